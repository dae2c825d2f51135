// アウトバウンドアダプター
//
// フレームワークが返したhttp::ResponseをCloudFrontの結果レスポンスに変換する。
// ボディは最後まで読み切ってから文字列化する（ストリームのまま返す手段はない）。

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use http_body::Body as HttpBody;
use http_body_util::BodyExt;
use lambda_http::http::Response;
use lambda_http::http::header::{CONTENT_TYPE, HeaderMap};
use tracing::debug;

use crate::domain::{
    AdapterError, BodyEncoding, CloudFrontResultHeader, CloudFrontResultHeaders,
    CloudFrontResultResponse, is_binary,
};

/// レスポンスのステータス説明
///
/// httpクレートのResponseは理由句を持たないため、
/// 説明文を返したいハンドラーはこの型をレスポンスのextensionsに入れる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusText(pub String);

impl StatusText {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }
}

/// http::ResponseをCloudFront結果レスポンスに変換
///
/// レスポンスは値で受け取り、ボディは一度だけ読み切る。
///
/// # 戻り値
/// * `Ok(CloudFrontResultResponse)` - 変換結果
/// * `Err(AdapterError)` - ボディ読み込み失敗
pub async fn adapt_response<B>(response: Response<B>) -> Result<CloudFrontResultResponse, AdapterError>
where
    B: HttpBody,
    B::Error: std::fmt::Display,
{
    let (parts, body) = response.into_parts();

    let status_description = parts
        .extensions
        .get::<StatusText>()
        .map(|text| text.0.clone())
        .unwrap_or_default();
    let headers = build_headers(&parts.headers);

    let content_type = parts
        .headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());

    // ボディがない場合はContent-Typeに関わらずtext
    let (body, body_encoding) = if body.is_end_stream() {
        (None, BodyEncoding::Text)
    } else {
        let bytes = body
            .collect()
            .await
            .map_err(|e| AdapterError::BodyRead(e.to_string()))?
            .to_bytes();

        if is_binary(content_type) {
            (Some(STANDARD.encode(&bytes)), BodyEncoding::Base64)
        } else {
            (
                Some(String::from_utf8_lossy(&bytes).into_owned()),
                BodyEncoding::Text,
            )
        }
    };

    debug!(
        status = parts.status.as_u16(),
        content_type = content_type.unwrap_or_default(),
        body_encoding = ?body_encoding,
        "レスポンス変換完了"
    );

    Ok(CloudFrontResultResponse {
        status: parts.status.as_u16().to_string(),
        status_description,
        headers,
        body,
        body_encoding,
    })
}

/// ヘッダーを結果形式にコピーする
///
/// 同名ヘッダーが複数ある場合は最後の値のみを残す。
/// 値はUTF-8として読み、不正なバイト列は置換文字にする。
fn build_headers(headers: &HeaderMap) -> CloudFrontResultHeaders {
    let mut result = CloudFrontResultHeaders::new();

    for name in headers.keys() {
        let Some(value) = headers.get_all(name).iter().next_back() else {
            continue;
        };

        result.insert(
            name.as_str().to_string(),
            vec![CloudFrontResultHeader {
                value: String::from_utf8_lossy(value.as_bytes()).into_owned(),
            }],
        );
    }

    result
}
