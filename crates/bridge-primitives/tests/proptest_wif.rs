use proptest::prelude::*;

use bridge_primitives::{Network, PrivateKey};

/// Strategy producing valid 32-byte scalars (non-zero, below the curve
/// order with overwhelming probability given the leading zero byte).
fn scalar() -> impl Strategy<Value = [u8; 32]> {
    prop::collection::vec(any::<u8>(), 31).prop_map(|mut v| {
        v.insert(0, 0x00);
        v[1] |= 0x01;
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&v);
        arr
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Decoding a WIF and re-encoding with the same network parameters
    /// reproduces the original string, for every network.
    #[test]
    fn wif_encode_decode_roundtrip(bytes in scalar(), net_idx in 0usize..3) {
        let net = [Network::Main, Network::Test, Network::Regtest][net_idx];
        let key = PrivateKey::from_bytes(&bytes).unwrap();
        let wif = key.to_wif(net);
        let decoded = PrivateKey::from_wif(&wif, net).unwrap();
        prop_assert_eq!(decoded.to_bytes(), key.to_bytes());
        prop_assert_eq!(decoded.to_wif(net), wif);
    }

    /// A WIF never decodes under a different network's parameters.
    #[test]
    fn wif_rejects_foreign_network(bytes in scalar(), net_idx in 0usize..3) {
        let nets = [Network::Main, Network::Test, Network::Regtest];
        let net = nets[net_idx];
        let wif = PrivateKey::from_bytes(&bytes).unwrap().to_wif(net);
        for other in nets {
            if other != net {
                prop_assert!(PrivateKey::from_wif(&wif, other).is_err());
            }
        }
    }
}
