//! Publishing for rendered clips.
//!
//! - Authorized-user OAuth credential file with refresh-token grant
//! - YouTube Data API resumable upload

pub mod credentials;
pub mod error;
pub mod metadata;
pub mod youtube;

pub use credentials::{AuthorizedUserToken, CredentialStore, DEFAULT_TOKEN_URI};
pub use error::{PublishError, PublishResult};
pub use metadata::{PrivacyStatus, VideoMetadata, PEOPLE_AND_BLOGS_CATEGORY};
pub use youtube::{YouTubeUploader, DEFAULT_UPLOAD_URL};
