//! 요청/응답 DTO

pub mod requests;
pub mod responses;

pub use requests::{LocalLoginRequest, OAuthCallbackQuery, SamlCallbackForm, SignupRequest, UpsertClientRequest};
pub use responses::{AuthResponse, ClientResponse, InitializedStrategiesResponse, UserResponse};
