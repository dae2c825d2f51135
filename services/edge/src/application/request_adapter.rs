// インバウンドアダプター
//
// CloudFront origin-requestイベントを、通常のHTTPクライアントが送った場合と
// 同等のhttp::Requestに変換する。イベントと設定のみに依存する純粋関数。

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use lambda_http::http::header::{HeaderMap, HeaderName, HeaderValue};
use lambda_http::http::{self, Method};
use lambda_http::{Body, Request};
use tracing::trace;
use url::Url;

use crate::domain::{AdapterError, BodyEncoding, CloudFrontOriginRequest, CloudFrontRequest};
use crate::infrastructure::AdapterConfig;

/// ボディをバイナリのまま渡すContent-Type
const MULTIPART_FORM_DATA: &str = "multipart/form-data";

/// origin-requestイベントをhttp::Requestに変換
///
/// # 引数
/// * `event` - CloudFront origin-requestイベント
/// * `config` - URLスキームを決める実行モード
///
/// # 戻り値
/// * `Ok(Request)` - 変換後のリクエスト
/// * `Err(AdapterError)` - レコード・ホスト欠落、不正なメソッド・ヘッダー・Base64
pub fn adapt_origin_request(
    event: &CloudFrontOriginRequest,
    config: &AdapterConfig,
) -> Result<Request, AdapterError> {
    let cf_request = event.request()?;

    let method = Method::from_bytes(cf_request.method.as_bytes())
        .map_err(|_| AdapterError::InvalidMethod(cf_request.method.clone()))?;
    let url = build_url(cf_request, config)?;
    let headers = build_headers(cf_request)?;
    let body = build_body(cf_request, &method)?;

    let mut request = http::Request::builder()
        .method(method)
        .uri(url.as_str())
        .body(body)
        .map_err(|e| AdapterError::BuildRequest(e.to_string()))?;
    *request.headers_mut() = headers;

    Ok(request)
}

/// リクエストURLを組み立てる
///
/// ホストは`x-forwarded-host` > `host`の優先順で決め、
/// `uri`とクエリ文字列をスキーム+ホストに対して解決する。
fn build_url(request: &CloudFrontRequest, config: &AdapterConfig) -> Result<Url, AdapterError> {
    let host = request
        .header_value("x-forwarded-host")
        .filter(|host| !host.is_empty())
        .or_else(|| request.header_value("host").filter(|host| !host.is_empty()))
        .ok_or(AdapterError::MissingHost)?;

    let base = Url::parse(&format!("{}://{}", config.scheme(), host))
        .map_err(|e| AdapterError::InvalidUrl(format!("{}: {}", host, e)))?;

    let path = if request.querystring.is_empty() {
        request.uri.clone()
    } else {
        format!("{}?{}", request.uri, request.querystring)
    };

    base.join(&path)
        .map_err(|e| AdapterError::InvalidUrl(format!("{}: {}", path, e)))
}

/// ヘッダーをHeaderMapにコピーする
///
/// 各エントリの先頭インスタンスのみを使い、`key`が空のエントリは読み飛ばす。
fn build_headers(request: &CloudFrontRequest) -> Result<HeaderMap, AdapterError> {
    let mut headers = HeaderMap::with_capacity(request.headers.len());

    for (name, values) in request.headers.iter() {
        let Some(first) = values.first() else {
            continue;
        };
        let Some(key) = first.key.as_deref().filter(|key| !key.is_empty()) else {
            trace!(header = name, "keyのないヘッダーをスキップ");
            continue;
        };

        let header_name = HeaderName::from_bytes(key.as_bytes())
            .map_err(|e| AdapterError::InvalidHeader(format!("{}: {}", key, e)))?;
        let header_value = HeaderValue::from_str(&first.value)
            .map_err(|e| AdapterError::InvalidHeader(format!("{}: {}", key, e)))?;

        headers.append(header_name, header_value);
    }

    Ok(headers)
}

/// ボディを組み立てる
///
/// GET/HEAD、またはボディ記述子がない場合は`Body::Empty`（空文字列ではない）。
fn build_body(request: &CloudFrontRequest, method: &Method) -> Result<Body, AdapterError> {
    if *method == Method::GET || *method == Method::HEAD {
        return Ok(Body::Empty);
    }

    let Some(data) = request.body.as_ref().and_then(|body| body.data.as_deref()) else {
        return Ok(Body::Empty);
    };
    let encoding = request.body.as_ref().map(|body| body.encoding).unwrap_or_default();

    match encoding {
        BodyEncoding::Text => Ok(Body::Text(data.to_string())),
        BodyEncoding::Base64 => {
            let decoded = STANDARD
                .decode(data)
                .map_err(|e| AdapterError::InvalidBase64(e.to_string()))?;

            let is_multipart = request
                .header_value("content-type")
                .is_some_and(|content_type| content_type.contains(MULTIPART_FORM_DATA));

            if is_multipart {
                Ok(Body::Binary(decoded))
            } else {
                Ok(Body::Text(String::from_utf8_lossy(&decoded).into_owned()))
            }
        }
    }
}
