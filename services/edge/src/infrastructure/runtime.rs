//! Lambdaランタイム接続
//!
//! OriginRequestHandlerをlambda_runtimeのイベントループに載せる。

use std::fmt::Display;

use http_body::Body as HttpBody;
use lambda_runtime::{Error, LambdaEvent, service_fn};
use tracing::debug;

use crate::application::{OriginRequestHandler, RequestHandler};
use crate::domain::{CloudFrontOriginRequest, CloudFrontResultResponse};

/// Lambda関数としてハンドラーを実行する
///
/// ハンドラーは全呼び出しで共有され、呼び出しごとの状態は持たない。
///
/// # 使用例
/// ```ignore
/// use edge::{AdapterConfig, OriginRequestHandler};
/// use edge::infrastructure::{init_logging, run};
///
/// init_logging();
/// let handler = OriginRequestHandler::new(app, AdapterConfig::from_env());
/// run(handler).await
/// ```
pub async fn run<H, C>(handler: OriginRequestHandler<H, C>) -> Result<(), Error>
where
    H: RequestHandler<C>,
    C: Send + 'static,
    <H::ResponseBody as HttpBody>::Error: Display,
{
    let handler = &handler;
    lambda_runtime::run(service_fn(move |event| handle_event(handler, event))).await
}

/// 1回の呼び出しを処理する
async fn handle_event<H, C>(
    handler: &OriginRequestHandler<H, C>,
    event: LambdaEvent<CloudFrontOriginRequest>,
) -> Result<CloudFrontResultResponse, Error>
where
    H: RequestHandler<C>,
    C: Send + 'static,
    <H::ResponseBody as HttpBody>::Error: Display,
{
    debug!(
        lambda_request_id = %event.context.request_id,
        "Lambda呼び出し開始"
    );

    handler.handle(event.payload).await
}
