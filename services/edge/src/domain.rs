// ドメイン層モジュール
pub mod cloudfront_event;
pub mod cloudfront_result;
pub mod content_type;
pub mod error;

// 再エクスポート
pub use cloudfront_event::{
    BodyAction, BodyEncoding, CloudFrontConfig, CloudFrontEventType, CloudFrontHeader,
    CloudFrontHeaders, CloudFrontOriginRequest, CloudFrontRecord, CloudFrontRecordData,
    CloudFrontRequest, CloudFrontRequestBody,
};
pub use cloudfront_result::{CloudFrontResultHeader, CloudFrontResultHeaders, CloudFrontResultResponse};
pub use content_type::is_binary;
pub use error::AdapterError;
