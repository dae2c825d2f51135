/// アダプター設定
///
/// 実行モード（production / development / test）を環境変数から読み込む。
/// モードはリクエストURLのスキーム選択にのみ使われ、
/// 読み込んだ設定はインバウンドアダプターへ明示的に渡す。
use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::{debug, warn};

/// 実行モードを指定する環境変数名
pub const MODE_ENV_VAR: &str = "APP_ENV";

/// 実行モードのパースエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModeParseError {
    #[error("Unknown mode: {0}")]
    Unknown(String),
}

/// 実行モード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    Production,
    #[default]
    Development,
    Test,
}

impl Mode {
    /// リクエストURLのスキーム
    ///
    /// production時のみhttps、それ以外はhttp
    pub fn scheme(&self) -> &'static str {
        if self.is_production() { "https" } else { "http" }
    }

    /// productionモードかどうか
    pub fn is_production(&self) -> bool {
        matches!(self, Mode::Production)
    }
}

impl FromStr for Mode {
    type Err = ModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Mode::Production),
            "development" | "dev" => Ok(Mode::Development),
            "test" => Ok(Mode::Test),
            _ => Err(ModeParseError::Unknown(s.to_string())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Production => "production",
            Mode::Development => "development",
            Mode::Test => "test",
        };
        f.write_str(name)
    }
}

/// アダプター設定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AdapterConfig {
    /// 実行モード
    mode: Mode,
}

impl AdapterConfig {
    /// 明示的なモードで設定を作成
    pub fn new(mode: Mode) -> Self {
        Self { mode }
    }

    /// 環境変数`APP_ENV`から設定を読み込む
    ///
    /// 未設定または不明な値の場合はdevelopmentとして扱う。
    pub fn from_env() -> Self {
        let mode = match std::env::var(MODE_ENV_VAR) {
            Ok(value) => value.parse().unwrap_or_else(|err: ModeParseError| {
                warn!(
                    env_var = MODE_ENV_VAR,
                    error = %err,
                    "不明な実行モード、developmentとして扱います"
                );
                Mode::Development
            }),
            Err(_) => {
                debug!(env_var = MODE_ENV_VAR, "実行モード未設定、developmentとして扱います");
                Mode::Development
            }
        };

        Self { mode }
    }

    /// 実行モードを取得
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// リクエストURLのスキームを取得
    pub fn scheme(&self) -> &'static str {
        self.mode.scheme()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    // テストで環境変数を安全に設定/削除するヘルパー
    // 注: Rust 2024エディションでset_var/remove_varはunsafe
    unsafe fn set_env(key: &str, value: &str) {
        unsafe { std::env::set_var(key, value) };
    }

    unsafe fn remove_env(key: &str) {
        unsafe { std::env::remove_var(key) };
    }

    #[test]
    fn test_mode_scheme() {
        assert_eq!(Mode::Production.scheme(), "https");
        assert_eq!(Mode::Development.scheme(), "http");
        assert_eq!(Mode::Test.scheme(), "http");
        assert!(Mode::Production.is_production());
        assert!(!Mode::Test.is_production());
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("production".parse::<Mode>(), Ok(Mode::Production));
        assert_eq!("Production".parse::<Mode>(), Ok(Mode::Production));
        assert_eq!("prod".parse::<Mode>(), Ok(Mode::Production));
        assert_eq!(" development ".parse::<Mode>(), Ok(Mode::Development));
        assert_eq!("test".parse::<Mode>(), Ok(Mode::Test));
        assert_eq!(
            "staging".parse::<Mode>(),
            Err(ModeParseError::Unknown("staging".to_string()))
        );
    }

    #[test]
    fn test_mode_display_roundtrip() {
        for mode in [Mode::Production, Mode::Development, Mode::Test] {
            assert_eq!(mode.to_string().parse::<Mode>(), Ok(mode));
        }
    }

    #[test]
    fn test_default_config_is_development() {
        let config = AdapterConfig::default();
        assert_eq!(config.mode(), Mode::Development);
        assert_eq!(config.scheme(), "http");
    }

    /// APP_ENV=productionでhttpsになる
    #[test]
    #[serial(app_env)]
    fn test_from_env_production() {
        unsafe { set_env(MODE_ENV_VAR, "production") };

        let config = AdapterConfig::from_env();

        assert_eq!(config.mode(), Mode::Production);
        assert_eq!(config.scheme(), "https");

        unsafe { remove_env(MODE_ENV_VAR) };
    }

    /// APP_ENV未設定ならdevelopment
    #[test]
    #[serial(app_env)]
    fn test_from_env_missing() {
        unsafe { remove_env(MODE_ENV_VAR) };

        let config = AdapterConfig::from_env();

        assert_eq!(config.mode(), Mode::Development);
    }

    /// 不明な値はdevelopmentにフォールバック
    #[test]
    #[serial(app_env)]
    fn test_from_env_unknown_value_falls_back() {
        unsafe { set_env(MODE_ENV_VAR, "staging") };

        let config = AdapterConfig::from_env();

        assert_eq!(config.mode(), Mode::Development);
        assert_eq!(config.scheme(), "http");

        unsafe { remove_env(MODE_ENV_VAR) };
    }
}
