use eth_txkit::{Address, AddressConvertible, AddressValidationError, PublicKey};

#[test]
fn test_upubkey_to_address() {
    let pubkey: PublicKey = (
        "04b90e9bb2617387eba4502c730de65a33878ef384a46f1096d86f2da19043304afa67d0ad09cf2bea0c6f2d1767a9e62a7a7ecc41facf18f2fa505d92243a658f"
    ).parse().unwrap();
    let ref_addr: Address = "d989829d88b0ed1b06edf5c50174ecfa64f14a64".parse().unwrap();
    assert_eq!(pubkey.address(), ref_addr);
}

#[test]
fn test_pubkey_to_address() {
    let pubkey: PublicKey = "03c1573f1528638ae14cbe04a74e6583c5562d59214223762c1a11121e24619cbc"
        .parse()
        .unwrap();
    let ref_addr: Address = "Af3CD5c36B97E9c28c263dC4639c6d7d53303A13".parse().unwrap();
    assert_eq!(pubkey.address(), ref_addr);
}

#[test]
fn test_from_uncompressed_matches_public_key() {
    let hex = "049be4a7831f96d6090c66f7facc9e2cf5a6713fe5007fe72d79209e4a35d7b420ab64477c4d458d6356c229878f59691df77219fe0c696cfba5edce285e8bf621";
    let pubkey: PublicKey = hex.parse().unwrap();
    let mut point = [0u8; 64];
    point.copy_from_slice(&pubkey.serialize_uncompressed()[1..]);

    let expected: Address = "0xe280029a7867ba5c9154434886c241775ea87e53".parse().unwrap();
    assert_eq!(Address::from_uncompressed(&point), expected);
    assert_eq!(pubkey.address(), expected);
}

#[test]
fn test_can_create_from_raw() {
    let addr = Address::from([0; 20]);
    assert_eq!(addr, Address::ZERO);
    assert_eq!(<[u8; 20]>::from(addr), [0; 20]);
}

#[test]
fn test_parse_and_display() {
    let addr: Address = "0x35bb6eF95c72bf4804334BB9d6A3c77Bef18d81B".parse().unwrap();
    assert_eq!(addr.to_string(), "0x35bb6ef95c72bf4804334bb9d6a3c77bef18d81b");
    assert_eq!(addr.to_hex(), addr.to_string());
    assert_eq!(
        "35BB6EF95C72BF4804334BB9D6A3C77BEF18D81B".parse::<Address>().unwrap(),
        addr
    );
    assert_eq!(addr.as_bytes()[0], 0x35);
}

#[test]
fn test_parse_errors() {
    assert_eq!(
        "0x1234".parse::<Address>().unwrap_err(),
        AddressValidationError::InvalidLength(4)
    );
    assert_eq!(
        "0x35bb6ef95c72bf4804334bb9d6a3c77bef18d81b00"
            .parse::<Address>()
            .unwrap_err(),
        AddressValidationError::InvalidLength(42)
    );
    assert_eq!(
        "0xzzbb6ef95c72bf4804334bb9d6a3c77bef18d81b"
            .parse::<Address>()
            .unwrap_err(),
        AddressValidationError::InvalidHex
    );
}

#[test]
fn test_to_checksum_address() {
    let addresses = vec![
        "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
        "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359",
        "0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB",
        "0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb",
        "0x00220a0cf47C7B9Be7a2e6ba89f429762e7B9adB",
        "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf",
        "0xE280029a7867BA5C9154434886c241775ea87e53",
    ];

    addresses.iter().for_each(|&addr| {
        assert_eq!(addr, addr.parse::<Address>().unwrap().to_checksum_address());
    });
    addresses.iter().for_each(|&addr| {
        assert_eq!(
            addr,
            addr.to_lowercase()
                .parse::<Address>()
                .unwrap()
                .to_checksum_address()
        );
    });
}
