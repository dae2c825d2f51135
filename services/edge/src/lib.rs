//! CloudFront Lambda@Edge origin-requestアダプター
//!
//! origin-requestイベントを`http::Request`に変換して既存のWebフレームワークの
//! ハンドラーで処理し、`http::Response`をCloudFrontの結果レスポンスに戻す。

// Domain layer modules
pub mod domain;

// Application layer modules
pub mod application;

// Infrastructure layer modules
pub mod infrastructure;

pub use application::{OriginRequestHandler, RequestHandler, StatusText};
pub use infrastructure::{AdapterConfig, Mode};
