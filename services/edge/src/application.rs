// アプリケーション層モジュール
pub mod lambda_handler;
pub mod request_adapter;
pub mod response_adapter;

// 再エクスポート
pub use lambda_handler::{ContextLoader, OriginRequestHandler, RequestHandler};
pub use request_adapter::adapt_origin_request;
pub use response_adapter::{StatusText, adapt_response};
