pub mod codec;
pub mod errors;
pub mod key;
pub mod payload;

pub use codec::SessionTokenCodec;
pub use errors::SessionError;
pub use key::SessionKey;
pub use payload::SessionPayload;
