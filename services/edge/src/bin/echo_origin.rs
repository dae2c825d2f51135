/// エコーorigin-request Lambdaエントリポイント
///
/// 受け取ったリクエストのボディとヘッダーをそのまま返す。
/// デプロイ後の疎通確認と、アダプターの組み込み例を兼ねる。
use edge::domain::CloudFrontOriginRequest;
use edge::infrastructure::{init_logging, run};
use edge::{AdapterConfig, OriginRequestHandler, StatusText};
use lambda_http::http::{HeaderValue, Response};
use lambda_http::{Body, Request};
use lambda_runtime::Error;
use tracing::info;

/// エコーレスポンスに付けるディストリビューション名ヘッダー
const DISTRIBUTION_HEADER: &str = "x-edge-distribution";

/// イベントから読み出すアプリケーションコンテキスト
#[derive(Debug, Clone)]
struct EchoContext {
    distribution_domain_name: String,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    let config = AdapterConfig::from_env();
    info!(mode = %config.mode(), "エコーLambda関数を初期化");

    let handler = OriginRequestHandler::new(echo, config).with_context_loader(load_context);

    run(handler).await
}

/// コンテキストローダー
fn load_context(event: &CloudFrontOriginRequest) -> Result<EchoContext, Error> {
    let record = event.record()?;
    Ok(EchoContext {
        distribution_domain_name: record.config.distribution_domain_name.clone(),
    })
}

/// リクエストのボディとヘッダーをそのまま返すハンドラー
async fn echo(request: Request, context: Option<EchoContext>) -> Result<Response<Body>, Error> {
    let (parts, body) = request.into_parts();

    let mut response = Response::builder().status(200).body(body)?;
    *response.headers_mut() = parts.headers;
    response.extensions_mut().insert(StatusText::new("OK"));

    if let Some(context) = context {
        response.headers_mut().insert(
            DISTRIBUTION_HEADER,
            HeaderValue::from_str(&context.distribution_domain_name)?,
        );
    }

    Ok(response)
}
