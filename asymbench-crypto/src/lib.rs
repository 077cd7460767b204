//! Asymbench Crypto Adapter
//!
//! Implements the core's `CryptoCapability` seam over the RustCrypto
//! ecosystem: `rsa` (PSS signatures, OAEP encryption), `p256`/`p384`/
//! `p521` (ECDSA + ECDH), `ed25519-dalek`, and `x25519-dalek`.
//!
//! The measurement core never sees these crates; it holds opaque
//! `KeyPair` values and calls back through the trait.

pub mod families;
pub mod keypair;
pub mod provider;

pub use keypair::KeyPair;
pub use provider::CryptoProvider;
