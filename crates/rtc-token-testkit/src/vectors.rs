//! Golden test vectors for cross-implementation verification.
//!
//! Every implementation of the token format must produce identical claim
//! bytes, signatures, and token text for these inputs.

use rtc_token_core::{
    encode, wrap, ClaimSet, HmacSha256Signer, Privilege, Signer, Token, TOKEN_VERSION,
};

/// A golden test vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    pub app_id: &'static str,
    pub app_certificate: &'static str,
    pub channel_name: &'static str,
    pub uid: u32,
    pub salt: u32,
    pub issued_at: u32,
    /// (privilege, expire_at) pairs.
    pub privileges: &'static [(Privilege, u32)],
    /// Expected claim bytes (hex).
    pub expected_claims: &'static str,
    /// Expected signature (hex).
    pub expected_signature: &'static str,
    /// Expected token text.
    pub expected_token: &'static str,
}

const PUBLISHER_4600: &[(Privilege, u32)] = &[
    (Privilege::JoinChannel, 4600),
    (Privilege::PublishAudioStream, 4600),
    (Privilege::PublishVideoStream, 4600),
    (Privilege::PublishDataStream, 4600),
];

const PUBLISHER_LONG: &[(Privilege, u32)] = &[
    (Privilege::JoinChannel, 1_700_003_600),
    (Privilege::PublishAudioStream, 1_700_003_600),
    (Privilege::PublishVideoStream, 1_700_003_600),
    (Privilege::PublishDataStream, 1_700_003_600),
];

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "demo publisher",
            app_id: "demoApp",
            app_certificate: "demoCert",
            channel_name: "lobby",
            uid: 42,
            salt: 0x1234_5678,
            issued_at: 1000,
            privileges: PUBLISHER_4600,
            expected_claims: "070064656d6f41707005006c6f6262792a00000078563412e8030000\
                              04000100f81100000200f81100000300f81100000400f8110000",
            expected_signature: "b19f75a30befba512d711f0af5411d65967bc49a5ab6d51ef3c9a3a4cfddac63",
            expected_token: "AbGfdaML77pRLXEfCvVBHWWWe8SaWrbVHvPJo6TP3axjBwBkZW1vQXBwBQBsb2JieSoAAAB4VjQS\
                             6AMAAAQAAQD4EQAAAgD4EQAAAwD4EQAABAD4EQAA",
        },
        GoldenVector {
            name: "wildcard subscriber",
            app_id: "demoApp",
            app_certificate: "demoCert",
            channel_name: "lobby",
            uid: 0,
            salt: 0,
            issued_at: 1000,
            privileges: &[(Privilege::JoinChannel, 1060)],
            expected_claims: "070064656d6f41707005006c6f6262790000000000000000e80300000100010024040000",
            expected_signature: "9bd62d674106dd79e52b3be4f20ba4d8960afc9099fc68ba06e45894c0054c63",
            expected_token: "AZvWLWdBBt155Ss75PILpNiWCvyQmfxougbkWJTABUxjBwBkZW1vQXBwBQBsb2JieQAAAAAAAAAA\
                             6AMAAAEAAQAkBAAA",
        },
        GoldenVector {
            name: "hex app id, max salt",
            app_id: "970CA35de60c44645bbae8a215061b33",
            app_certificate: "5CFd2fd1755d40ecb72977518be15d3b",
            channel_name: "stream-7",
            uid: 2_882_341_273,
            salt: u32::MAX,
            issued_at: 1_700_000_000,
            privileges: PUBLISHER_LONG,
            expected_claims: "200039373043413335646536306334343634356262616538613231353036316233\
                              33080073747265616d2d379909cdabffffffff00f153650400010010ff536502\
                              0010ff5365030010ff5365040010ff5365",
            expected_signature: "ba1733ea66ac53107ca8c7f1beb20c1148924a01f70ecf24b938da47d4f9671e",
            expected_token: "AboXM-pmrFMQfKjH8b6yDBFIkkoB9w7PJLk42kfU-WceIAA5NzBDQTM1ZGU2MGM0NDY0NWJiYWU4\
                             YTIxNTA2MWIzMwgAc3RyZWFtLTeZCc2r_____wDxU2UEAAEAEP9TZQIAEP9TZQMAEP9TZQQAEP9TZQ",
        },
    ]
}

/// Build the claim set a vector describes.
pub fn claims_from_vector(vector: &GoldenVector) -> ClaimSet {
    ClaimSet {
        app_id: vector.app_id.to_string(),
        channel_name: vector.channel_name.to_string(),
        uid: vector.uid,
        salt: vector.salt,
        issued_at: vector.issued_at,
        privileges: vector.privileges.iter().copied().collect(),
    }
}

/// Produce the token a vector describes.
pub fn token_from_vector(vector: &GoldenVector) -> Token {
    let bytes = encode(&claims_from_vector(vector)).expect("vector claims are valid");
    let signature = HmacSha256Signer.sign(&bytes, vector.app_certificate.as_bytes());
    wrap(TOKEN_VERSION, &signature, &bytes).expect("current version is supported")
}

/// Check every vector, returning (name, matches, produced token).
///
/// Call this to verify your implementation matches the reference.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    all_vectors()
        .iter()
        .map(|v| {
            let bytes = encode(&claims_from_vector(v)).expect("vector claims are valid");
            let signature = HmacSha256Signer.sign(&bytes, v.app_certificate.as_bytes());
            let token = token_from_vector(v);

            let matches = hex::encode(&bytes) == v.expected_claims
                && signature.to_hex() == v.expected_signature
                && token.as_str() == v.expected_token;

            (v.name.to_string(), matches, token.into_string())
        })
        .collect()
}
