//! Shared test fixture: fixed, mutually consistent parameters.
//!
//! The coin group has a 1024-bit modulus and a 256-bit order, the serial
//! group has the coin modulus as its order, the accumulator proof group has
//! a 1025-bit order above every coin value, and the RSA modulus is a 2047-bit
//! product of two primes with quadratic residue generators.

use alloc::sync::Arc;

use num_bigint::BigUint;
use num_traits::One as _;
use rand::{CryptoRng, RngCore};

use crate::{
    coin::{Coin, generate_serial},
    denomination::Denomination,
    keys::CoinSigningKey,
    params::{AccumulatorParams, GroupParams, ZerocoinContext},
    seed::SeedExpander,
};

/// A 2045-bit accumulator value with checksum `1007276367`.
pub(crate) const ACCUMULATOR_VALUE: &str = concat!(
    "35616006634029407329260439063644231610203424406241175703070912490606392068851306",
    "53863988878111310428748077228638352868732650158168092423962689079110324194403339",
    "35673968419306449766402979758022785452668059811949315350648686191511771208466645",
    "71487233204567733319475681677658389294861985415871920084490439635423327682573458",
    "34745820618774265995860622095001311481803199614256817649809449639792171267561165",
    "83985156339598542735317902183499902325517641619372353945801123912598385869288226",
    "14974276460894627977769801365197792794685329103886630953045340077109867994594850",
    "44817255525023687739904795167747777071707348910578166973",
);

const COIN_G: &str = concat!(
    "5053d2040a47aebbf4fb286ef44a610debb3fad9262b783d28a9a7e560454f6e",
    "60df1db18a8159972bb21bb505b697a2b96940526cbb5b44426f950ff7b01077",
    "f7432f71290aacc7c0c5830c16cf75baed1e663b1611b0a9de05ebc2328b457d",
    "b745e17a1dbc3700967b9438b6fc892ff5f99cae38731423fd0720355475980a",
);

const COIN_H: &str = concat!(
    "7c197d17252042c33409d04933214b561aa39c78bee47ff1bb91241ae558692a",
    "eaf9cf11fad07379656f613bb44860f0355f05112c8d62dfb3839680274cf2b2",
    "35f9e85a6a36ed3ac311f4c0f25e85e173fa4b57a265a4d10def87cacd0bdc89",
    "de9ae51ac44e8bcaae3036893c67b845eefe35693f3637d5bf82313840ef1fe7",
);

const COIN_MODULUS: &str = concat!(
    "97e90cd1bc32eb0aeafa76f8678a71b00889bc24e3ef3c40dd865885575f712c",
    "1ca58e318ae056a91d29d2bd268fb02b9be6bee5ecc557f4048eefe66fc676c3",
    "684286b0a004aaf039bbb691324f8980918c9ab85a690d883611b54978cc8933",
    "34b630e3ff2cfb14c5635e5a5fe14f17711e0e95edf3571393fe53b43b563f8b",
);

const COIN_ORDER: &str = concat!(
    "cdfc9b1e20c04a6640aeedde06f0d7332aa7284e8386b5d4967bf713fad6dc45",
);

const SERIAL_G: &str = concat!(
    "33e956c4aece94c5cdf06862c9bde36f01beff5cc5339e629274b05de6384d73",
    "3e1c80008111b015244391c63fd90050b2160843f865d2aa0f99f0f5e320effa",
    "e6c5cb3d8a6f37b48f39735bc25617ff85ddebab5469677035f3512dec2511d6",
    "dcad5a52f25da938f3841b9a62705400a9ce3d201a11a7b7ce1bc14fd4e170a7",
    "f9fca94b1fbce1cd",
);

const SERIAL_H: &str = concat!(
    "702d83bd2b5a1fe62bd769d911200d9e0a600c1228c0c64bfce66d617206aa12",
    "2d93e43dc3a81f97c3ac46f2f9ab78fe25c0db08211242f89ce844b95c8df729",
    "dff030d679518c92f24a9d7e4468b94b1b32de3b853f5f7632f54420c07d3683",
    "27b2a29a6688ac2dd85912ebcd7a8cfd7217dacb84a391f52460ba3480b55d04",
    "00efd9c721f6f871",
);

const SERIAL_MODULUS: &str = concat!(
    "81531dfea57be8a4dc09e2d86e553a53c6f36b94c9ce03117ef0b9a42d3cc5cf",
    "c863e05531769388a214867cb3e50ee2f551fa7d504ccddab9076a4de29fca7d",
    "b2d34e55c89cef620cf1f4760405f62ca24320df4ce5510570228817415580d7",
    "2959b15a899374fa9844f406f01be36b0c05359a5761cfba9cf5711227cf82d4",
    "b7dba2ae76b2f0cf",
);

const SERIAL_ORDER: &str = concat!(
    "97e90cd1bc32eb0aeafa76f8678a71b00889bc24e3ef3c40dd865885575f712c",
    "1ca58e318ae056a91d29d2bd268fb02b9be6bee5ecc557f4048eefe66fc676c3",
    "684286b0a004aaf039bbb691324f8980918c9ab85a690d883611b54978cc8933",
    "34b630e3ff2cfb14c5635e5a5fe14f17711e0e95edf3571393fe53b43b563f8b",
);

const ACCPOK_G: &str = concat!(
    "4701f378005e73687005c5f6839c5d8ead77b119f2199ea33d8e4b5294e408d2",
    "25f69a3ba9f64486d9892d218822375b9a5d04d3a5d7eda9f2fa30057a266352",
    "7c2854a282ee0d673e74aaf1d32fe8290de9d4a6dca08013b74f817519da120b",
    "cb0b5e3c6a804b1a5741a5d97c87d75b373704255224fb7de535351581de18bf",
    "407d5a2cd543404f36b76f26bc52af7d75ad782ea9508760b9dfe1713ed4d16b",
    "63c6e6583b4",
);

const ACCPOK_H: &str = concat!(
    "76d6857b210ad613c201c4ed3211f01ca5199b7d647708f7d9e822cfbfaa10a9",
    "65e0ff6453f64b603a78121714270e92322330afb5b3e67f63d2a137a0a140f9",
    "648459ed44fbd7c7065acb5fcd7804bca271cc001bea0d35d147588bc0890b21",
    "4d4a5ff180b9a92e61eeac10b5c8225373094771917f02fff0b630196ec8a823",
    "8ecf22e110a5801664a69f45f587213e25d5422c84c9ab71bb1b594f1f421302",
    "f98003894f5",
);

const ACCPOK_MODULUS: &str = concat!(
    "ca9aece6d4193c6d31415be0906635fd789b8f7d0a9d3aada4da7f0e390e1bb3",
    "e99bafb36ea21c273c4a35a63749485686eefb9c4b011a7167b74be4459f1b3f",
    "4e82cfd38b2e9bff8f2f873ae5f6e7daa0891a8b482b7d5375bc74b2d9cb7fe5",
    "a4a09d55b7e8370866285d3f5b1abcf654b8bb1aaebfa3dee138e37bb329b1d7",
    "4c9e5b29d1d17e278c6f10d2bdc601d724ba3cbb5ac5b509817eb7448d337269",
    "2501f9d11b5",
);

const ACCPOK_ORDER: &str = concat!(
    "1ffb51b87d4a785ae90184c33c1608c8451a143918a41b9b00f1707143925b1b",
    "8326602f7747ad58f9fb9f90fa3e1232e8df347f16cb9058fe3d77a532e9260b",
    "876783111b66e734a17876dd4315e18a2b37fb493ad113c3d3f2bba3b047b323",
    "edc635da008f84492e0632a2b3b5b14de1389ae51a6b20533e983173dfbeae77",
    "5",
);

const RSA_MODULUS: &str = concat!(
    "6603ad7844383d0710a5fbdf53022dcac63e4c43ebce1d70b33cba521d45c01b",
    "e0f0d75b33e95523e7560ca62a3dd080040fd2fe92ce9abeacaf443fb7585ae7",
    "51aea38fcfd2a386578c7ab0109bf2fbbc567843f790d70fb6376e3e53cf874c",
    "41094545106b17d190d5593679bc7945043e022385095841e97e846e2f09afc9",
    "c0092b9c446e3aa2c4e8ae046e903d59c23bccc37498b3f329d47b79068f4062",
    "775a7c810eb490fd83b884cfc02da1537f016b9101ffdbf9a60926f1090d2da8",
    "def77efc9f3c8d5c6f28e34756c9b460ed8ab535cbaf57d402b1e4ef6971821f",
    "4ed9648793af87ba936772d0a1c1c94ed97b38f25ed79f7a7f9bd882d4d1769f",
);

const QRN_G: &str = concat!(
    "54a18a19c7114f862a68f63dd3dbe0b4652d2633ac27596fe66921d580f5eab2",
    "48cc02a3333139206145522e5abaa1c0c09af5b885876318ca80aa1673286466",
    "af379bb4872f7cc8eb9871b56ce1f9005868d015fdba7a4e24a1cbbaf4aad623",
    "ae012624f7156fc3f01ad2aa855710e29bf0ddeb41d58c65f059cccc0aa6a9c3",
    "0979c56770cb85bcce8cabbe9d58922b3d591f14f8470eff2793b82867bfc917",
    "be44b32a9786cf2c9806ee0ceca37260c681761a8ab2afaf1a6ff7ea334846ee",
    "334b076e4edfa76c0b430c70f77d6bc6c80baef2ca24f14376fe21b2155d3d26",
    "077b9c2a44250ebe3d238888280c0b8206b6bd22e0b6ae8c7121bc3511141d70",
);

const QRN_H: &str = concat!(
    "13c7f1a5a727d5a8585d2fbc99e69dc62486b1b7d0703cf1e412bbe0c393cbf8",
    "5c772446b2022320ffae71e84bb339c3abe00a61d8cddb03537d6dd4fa20b9e8",
    "c7baae9541abc545635f1c7c314a6d4300115c475dbafdbe7324c153d17ccb43",
    "ddd207fde2f36b4e5896b8866a909bc1b59ef765be2136bf6e39341828246c16",
    "4ccfff5ae20bd714a7bf376e9763bae919f4d902a17d0a6be080acf62b703e5c",
    "dae291257c8002d88b8337b7b5bfbb01dab0e14ccebabde542e54267de67d764",
    "3d3cf42643c10d26bd2343674dce4d1b801327211c75f20358081cc0f5878763",
    "3aa6235f158f4c181b565928b59cc4af57446ebeafacf3e858c55b2149f708d9",
);

/// Seed expansion backed by the SHA-256 reproduction.
#[derive(Debug)]
pub(crate) struct MockExpansion;

impl SeedExpander for MockExpansion {
    fn expand(&self, seed: &[u8; 32]) -> BigUint {
        mock_expander::expand(seed)
    }
}

fn from_hex(digits: &str) -> BigUint {
    BigUint::parse_bytes(digits.as_bytes(), 16).unwrap()
}

fn group(g: &str, h: &str, modulus: &str, order: &str) -> GroupParams {
    GroupParams::new(from_hex(g), from_hex(h), from_hex(modulus), from_hex(order))
}

pub(crate) fn expander() -> Arc<dyn SeedExpander> {
    Arc::new(MockExpansion)
}

/// The fixture context: base 961, coin values in $(2^{290}, p_{\text{coin}})$.
pub(crate) fn context() -> ZerocoinContext {
    let coin = group(COIN_G, COIN_H, COIN_MODULUS, COIN_ORDER);
    let serial = group(SERIAL_G, SERIAL_H, SERIAL_MODULUS, SERIAL_ORDER);
    let pok = group(ACCPOK_G, ACCPOK_H, ACCPOK_MODULUS, ACCPOK_ORDER);
    let qrn = GroupParams::new(
        from_hex(QRN_G),
        from_hex(QRN_H),
        from_hex(RSA_MODULUS),
        BigUint::ZERO,
    );
    let accumulator = AccumulatorParams::new(
        from_hex(RSA_MODULUS),
        BigUint::from(961u32),
        pok,
        qrn,
        BigUint::one() << 290u32,
        coin.modulus().clone(),
    );
    ZerocoinContext::new(accumulator, coin, serial, expander()).unwrap()
}

/// A key whose public key yields a valid serial.
pub(crate) fn serial_key(rng: &mut (impl RngCore + CryptoRng)) -> CoinSigningKey {
    loop {
        let key = CoinSigningKey::random(rng);
        if generate_serial(&key.verification_key()).is_ok() {
            return key;
        }
    }
}

/// Mint a fresh coin.
pub(crate) fn mint(
    ctx: &ZerocoinContext,
    denomination: Denomination,
    rng: &mut (impl RngCore + CryptoRng),
) -> Coin {
    Coin::mint(ctx, serial_key(rng), denomination, rng).unwrap()
}
