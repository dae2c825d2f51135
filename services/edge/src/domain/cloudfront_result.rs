//! CloudFront結果レスポンス
//!
//! origin-requestトリガーのLambda関数が返すレスポンスのJSON構造。

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::BodyEncoding;

/// ヘッダー名 → 値リスト（結果側は`key`を持たない）
pub type CloudFrontResultHeaders = BTreeMap<String, Vec<CloudFrontResultHeader>>;

/// 結果ヘッダー1インスタンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudFrontResultHeader {
    pub value: String,
}

/// CloudFrontに返すレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudFrontResultResponse {
    /// 数値ステータスの文字列表現（例: "200"）
    pub status: String,
    /// ステータス説明（未設定時は空文字列）
    pub status_description: String,
    pub headers: CloudFrontResultHeaders,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    pub body_encoding: BodyEncoding,
}
