/// アダプターのエラー型
///
/// イベント・レスポンスの変換に失敗した場合に返す。
/// リトライや回復は行わず、呼び出し元（Lambdaランタイム）へそのまま伝播させる。
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdapterError {
    /// `Records`が空
    #[error("Missing record in origin-request event")]
    MissingRecord,
    /// `x-forwarded-host`も`host`もない
    #[error("Missing host header in origin-request event")]
    MissingHost,
    /// HTTPメソッドとして解釈できない
    #[error("Invalid HTTP method: {0}")]
    InvalidMethod(String),
    /// URLの組み立てに失敗
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),
    /// ヘッダー名または値が不正
    #[error("Invalid header: {0}")]
    InvalidHeader(String),
    /// Base64ボディのデコードに失敗
    #[error("Invalid base64 body: {0}")]
    InvalidBase64(String),
    /// レスポンスボディの読み込みに失敗
    #[error("Failed to read response body: {0}")]
    BodyRead(String),
    /// http::Requestの構築に失敗
    #[error("Failed to build request: {0}")]
    BuildRequest(String),
}
