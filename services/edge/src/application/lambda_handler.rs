/// origin-requestハンドラー
///
/// インバウンドアダプター → コンテキストローダー → フレームワークのハンドラー →
/// アウトバウンドアダプターの順に1回ずつ実行する。状態は持たない。
/// どのステップのエラーもそのまま呼び出し元（Lambdaランタイム）へ返す。
use std::future::Future;

use async_trait::async_trait;
use http_body::Body as HttpBody;
use lambda_http::Request;
use lambda_http::http::Response;
use lambda_runtime::Error;
use tracing::{Instrument, info, info_span};

use crate::application::{adapt_origin_request, adapt_response};
use crate::domain::{CloudFrontOriginRequest, CloudFrontResultResponse};
use crate::infrastructure::AdapterConfig;

/// フレームワーク側のリクエストハンドラー
///
/// `(Request, Option<C>) -> Response<B>`の非同期関数であれば
/// ブランケット実装によりそのまま使える。
#[async_trait]
pub trait RequestHandler<C>: Send + Sync
where
    C: Send + 'static,
{
    /// レスポンスボディの型
    type ResponseBody: HttpBody + Send;

    /// リクエストを処理してレスポンスを返す
    async fn handle(
        &self,
        request: Request,
        context: Option<C>,
    ) -> Result<Response<Self::ResponseBody>, Error>;
}

#[async_trait]
impl<F, Fut, B, C> RequestHandler<C> for F
where
    F: Fn(Request, Option<C>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Response<B>, Error>> + Send + 'static,
    B: HttpBody + Send + 'static,
    C: Send + 'static,
{
    type ResponseBody = B;

    async fn handle(&self, request: Request, context: Option<C>) -> Result<Response<B>, Error> {
        (self)(request, context).await
    }
}

/// アプリケーション定義のコンテキストをイベントから生成する関数
pub type ContextLoader<C> =
    Box<dyn Fn(&CloudFrontOriginRequest) -> Result<C, Error> + Send + Sync>;

/// origin-requestイベントを処理するハンドラー
pub struct OriginRequestHandler<H, C> {
    /// フレームワークのリクエストハンドラー
    handler: H,
    /// コンテキストローダー（未設定ならコンテキストはNone）
    load_context: Option<ContextLoader<C>>,
    /// URLスキームを決める設定
    config: AdapterConfig,
}

impl<H, C> OriginRequestHandler<H, C>
where
    H: RequestHandler<C>,
    C: Send + 'static,
    <H::ResponseBody as HttpBody>::Error: std::fmt::Display,
{
    /// 新しいハンドラーを作成
    ///
    /// # Arguments
    /// * `handler` - フレームワークのリクエストハンドラー
    /// * `config` - アダプター設定（通常は`AdapterConfig::from_env()`）
    pub fn new(handler: H, config: AdapterConfig) -> Self {
        Self {
            handler,
            load_context: None,
            config,
        }
    }

    /// コンテキストローダーを設定
    ///
    /// リクエストごとに元のイベントを渡して1回呼び出される。
    pub fn with_context_loader<L>(mut self, load_context: L) -> Self
    where
        L: Fn(&CloudFrontOriginRequest) -> Result<C, Error> + Send + Sync + 'static,
    {
        self.load_context = Some(Box::new(load_context));
        self
    }

    /// origin-requestイベントを処理
    ///
    /// # 処理フロー
    /// 1. イベントをhttp::Requestに変換
    /// 2. コンテキストローダーが設定されていれば呼び出す
    /// 3. フレームワークのハンドラーを呼び出す
    /// 4. レスポンスをCloudFront結果レスポンスに変換
    pub async fn handle(
        &self,
        event: CloudFrontOriginRequest,
    ) -> Result<CloudFrontResultResponse, Error> {
        let record = event.record()?;
        let span = info_span!(
            "origin_request",
            request_id = %record.config.request_id,
            distribution_id = %record.config.distribution_id,
            method = %record.request.method,
            uri = %record.request.uri,
        );

        async {
            info!("origin-request受信");

            let request = adapt_origin_request(&event, &self.config)?;
            let context = self
                .load_context
                .as_ref()
                .map(|load_context| load_context(&event))
                .transpose()?;

            let response = self.handler.handle(request, context).await?;
            let result = adapt_response(response).await?;

            info!(status = %result.status, "origin-requestレスポンス返却");
            Ok::<_, Error>(result)
        }
        .instrument(span)
        .await
    }
}
