use crate::error::{Result, RoomatcherError};
use roomatcher_common::{
    MatchConfig, RewriteRule, RuleSet, SpecialRules, Threshold, DEFAULT_CANDIDATE_LIMIT,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 永続化される既定設定（~/.config/roomatcher/config.json）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub threshold: Threshold,
    pub rewrite_rules: Vec<RewriteRule>,
    pub special_rules: SpecialRules,
    pub candidate_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threshold: Threshold::default(),
            rewrite_rules: Vec::new(),
            special_rules: SpecialRules::default(),
            candidate_limit: DEFAULT_CANDIDATE_LIMIT,
        }
    }
}

/// 1回の照合実行に対する上書き指定（CLIから組み立てる）
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub threshold: Option<i64>,
    pub rules_file: Option<PathBuf>,
    pub rules: Vec<String>,
    pub special: Vec<String>,
    pub no_default_special: bool,
    pub limit: Option<usize>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| RoomatcherError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("roomatcher").join("config.json"))
    }

    /// 書き換えルールを追加（`PATTERN=>REPLACEMENT`）。パターンは追加時に検証する
    pub fn add_rule(&mut self, text: &str) -> Result<()> {
        let rule: RewriteRule = text.parse()?;
        RuleSet::compile(std::slice::from_ref(&rule))?;
        self.rewrite_rules.push(rule);
        Ok(())
    }

    /// 書き換えルールを位置指定で削除
    pub fn remove_rule(&mut self, index: usize) -> Result<RewriteRule> {
        if index >= self.rewrite_rules.len() {
            return Err(RoomatcherError::Config(format!(
                "ルール番号 {} は存在しません（登録数: {}）",
                index,
                self.rewrite_rules.len()
            )));
        }
        Ok(self.rewrite_rules.remove(index))
    }

    /// 上書き指定を反映した照合設定を組み立てる
    ///
    /// 閾値の範囲と全パターンのコンパイルをここで検証し、行の処理前に失敗させる。
    pub fn build_match_config(&self, overrides: &Overrides) -> Result<MatchConfig> {
        let threshold = match overrides.threshold {
            Some(value) => Threshold::new(value)?,
            None => self.threshold,
        };

        let mut rules = self.rewrite_rules.clone();
        if let Some(path) = &overrides.rules_file {
            rules.extend(load_rules_file(path)?);
        }
        for text in &overrides.rules {
            rules.push(text.parse::<RewriteRule>()?);
        }
        let rewrite_rules = RuleSet::compile(&rules)?;

        let mut special_rules = if overrides.no_default_special {
            SpecialRules::empty()
        } else {
            self.special_rules.clone()
        };
        for keyword in &overrides.special {
            special_rules.insert(keyword);
        }

        let candidate_limit = overrides.limit.unwrap_or(self.candidate_limit);
        if candidate_limit == 0 {
            return Err(RoomatcherError::Config("候補数は1以上を指定してください".into()));
        }

        Ok(MatchConfig {
            threshold,
            rewrite_rules,
            special_rules,
            candidate_limit,
        })
    }
}

/// 書き換えルールのJSONファイルを読み込む
///
/// `[{"pattern": "...", "replacement": "..."}]` または `["PATTERN=>REPLACEMENT"]`
pub fn load_rules_file(path: &Path) -> Result<Vec<RewriteRule>> {
    if !path.exists() {
        return Err(RoomatcherError::FileNotFound(path.display().to_string()));
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RuleEntry {
        Pair(RewriteRule),
        Text(String),
    }

    let content = std::fs::read_to_string(path)?;
    let entries: Vec<RuleEntry> = serde_json::from_str(&content)?;
    entries
        .into_iter()
        .map(|entry| match entry {
            RuleEntry::Pair(rule) => Ok(rule),
            RuleEntry::Text(text) => Ok(text.parse::<RewriteRule>()?),
        })
        .collect()
}
