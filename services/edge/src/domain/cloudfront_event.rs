//! CloudFront origin-requestイベント
//!
//! Lambda@Edgeに渡されるorigin-requestイベントのJSON構造を型として定義する。
//! 境界でのバリデーションはserdeのデシリアライズで行い、
//! 欠落したフィールドは暗黙にフォールバックさせずエラーとする。

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::AdapterError;

/// CloudFront origin-requestイベント全体
///
/// 契約上`Records`は常に1件だけ含まれる。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloudFrontOriginRequest {
    #[serde(rename = "Records")]
    pub records: Vec<CloudFrontRecord>,
}

impl CloudFrontOriginRequest {
    /// 先頭のレコードを取得
    ///
    /// # 戻り値
    /// * `Ok(&CloudFrontRecordData)` - 先頭レコードの`cf`
    /// * `Err(AdapterError::MissingRecord)` - レコードが空
    pub fn record(&self) -> Result<&CloudFrontRecordData, AdapterError> {
        self.records
            .first()
            .map(|record| &record.cf)
            .ok_or(AdapterError::MissingRecord)
    }

    /// 先頭レコードのリクエスト記述子を取得
    pub fn request(&self) -> Result<&CloudFrontRequest, AdapterError> {
        self.record().map(|cf| &cf.request)
    }
}

/// イベント内の1レコード
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloudFrontRecord {
    pub cf: CloudFrontRecordData,
}

/// レコードの`cf`フィールド
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloudFrontRecordData {
    pub config: CloudFrontConfig,
    pub request: CloudFrontRequest,
}

/// ディストリビューション情報
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudFrontConfig {
    /// ディストリビューションのドメイン名（例: d111111abcdef8.cloudfront.net）
    pub distribution_domain_name: String,
    /// ディストリビューションID
    pub distribution_id: String,
    /// トリガーとなったイベント種別
    pub event_type: CloudFrontEventType,
    /// CloudFrontが発行するリクエストID（ログの相関に使う）
    pub request_id: String,
}

/// Lambda@Edgeのトリガー種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CloudFrontEventType {
    ViewerRequest,
    OriginRequest,
    OriginResponse,
    ViewerResponse,
}

/// リクエスト記述子
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudFrontRequest {
    /// 送信元IPアドレス
    pub client_ip: String,
    /// HTTPメソッド
    pub method: String,
    /// パス（クエリ文字列を含まない）
    pub uri: String,
    /// 先頭の`?`を含まないクエリ文字列
    #[serde(default)]
    pub querystring: String,
    /// 小文字化したヘッダー名 → ヘッダーインスタンスの一覧
    pub headers: CloudFrontHeaders,
    /// ボディ（include bodyが有効な場合のみ）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<CloudFrontRequestBody>,
}

impl CloudFrontRequest {
    /// ヘッダーの先頭インスタンスの値を取得
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .get(name)
            .and_then(|values| values.first())
            .map(|header| header.value.as_str())
    }
}

/// ヘッダー1インスタンス
///
/// `key`は元の大文字小文字を保持したヘッダー名。CloudFrontは省略することがある。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudFrontHeader {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub value: String,
}

impl CloudFrontHeader {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            value: value.into(),
        }
    }
}

/// 小文字ヘッダー名をキーとする順序付きマップ
///
/// JSONオブジェクトの出現順を保持する。同名ヘッダーの複数インスタンスは
/// 1エントリ内のリストとして表現される。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CloudFrontHeaders(Vec<(String, Vec<CloudFrontHeader>)>);

impl CloudFrontHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    /// 名前でヘッダーを検索（大文字小文字を区別しない）
    pub fn get(&self, name: &str) -> Option<&[CloudFrontHeader]> {
        self.0
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, values)| values.as_slice())
    }

    /// エントリを追加する。同名のエントリがあれば置き換える
    pub fn insert(&mut self, name: impl Into<String>, values: Vec<CloudFrontHeader>) {
        let name = name.into();
        match self
            .0
            .iter_mut()
            .find(|(key, _)| key.eq_ignore_ascii_case(&name))
        {
            Some(entry) => entry.1 = values,
            None => self.0.push((name, values)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[CloudFrontHeader])> {
        self.0
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for CloudFrontHeaders {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, values) in &self.0 {
            map.serialize_entry(name, values)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CloudFrontHeaders {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct HeadersVisitor;

        impl<'de> Visitor<'de> for HeadersVisitor {
            type Value = CloudFrontHeaders;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of header name to header instances")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut headers = CloudFrontHeaders::new();
                while let Some((name, values)) =
                    access.next_entry::<String, Vec<CloudFrontHeader>>()?
                {
                    headers.insert(name, values);
                }
                Ok(headers)
            }
        }

        deserializer.deserialize_map(HeadersVisitor)
    }
}

/// リクエストボディ記述子
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudFrontRequestBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<BodyAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    pub encoding: BodyEncoding,
    /// ボディがCloudFrontの上限で切り詰められたかどうか
    #[serde(default)]
    pub input_truncated: bool,
}

/// Lambda関数がボディを書き換えられるかどうか
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BodyAction {
    ReadOnly,
    Replace,
}

/// ボディのエンコーディング（イベントと結果で共通）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyEncoding {
    #[default]
    Text,
    Base64,
}
