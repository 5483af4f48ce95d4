//! User-facing strings, resolved once per run
//!
//! The orchestrator receives a [`Messages`] table at construction instead of
//! looking strings up globally.

/// Prompt and status texts shown during a merge session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Messages {
    /// Per-command confirmation prompt
    pub execute_command: String,
    /// Warning shown when the working copy is dirty
    pub dirty_warning: String,
    /// Question asked before discarding local changes
    pub discard_changes: String,
    /// Abort reason when local changes are kept
    pub dirty_declined: String,
    /// Prompt for the branch to merge from
    pub select_source: String,
    /// Prompt for the branch to merge into
    pub select_target: String,
    /// Final confirmation before syncing and merging
    pub proceed: String,
    /// Abort reason when the final confirmation is declined
    pub proceed_declined: String,
    /// Status shown before cloning
    pub cloning: String,
    /// Status shown before merging
    pub merging: String,
    /// Status shown when conflicts are detected
    pub conflict_detected: String,
    /// Status shown when the merge is finalized after resolution
    pub conflict_resolved: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self::english()
    }
}

impl Messages {
    /// English table
    pub fn english() -> Self {
        Self {
            execute_command: "Execute this command?".to_string(),
            dirty_warning: "The working directory has uncommitted changes.".to_string(),
            discard_changes: "Discard all local changes and continue?".to_string(),
            dirty_declined: "local changes were kept".to_string(),
            select_source: "Select the branch to merge from".to_string(),
            select_target: "Select the branch to merge into".to_string(),
            proceed: "Proceed with the merge?".to_string(),
            proceed_declined: "merge was not confirmed".to_string(),
            cloning: "Cloning".to_string(),
            merging: "Merging".to_string(),
            conflict_detected: "Merge conflicts detected. Opening the merge tool...".to_string(),
            conflict_resolved: "Conflicts resolved, committing the merge".to_string(),
        }
    }

    /// Japanese table
    pub fn japanese() -> Self {
        Self {
            execute_command: "このコマンドを実行しますか?".to_string(),
            dirty_warning: "作業ディレクトリにコミットされていない変更があります。".to_string(),
            discard_changes: "ローカルの変更をすべて破棄して続行しますか?".to_string(),
            dirty_declined: "ローカルの変更を保持しました".to_string(),
            select_source: "マージ元のブランチを選択してください".to_string(),
            select_target: "マージ先のブランチを選択してください".to_string(),
            proceed: "マージを実行しますか?".to_string(),
            proceed_declined: "マージは確認されませんでした".to_string(),
            cloning: "クローン中".to_string(),
            merging: "マージ中".to_string(),
            conflict_detected: "コンフリクトが発生しました。マージツールを起動します...".to_string(),
            conflict_resolved: "コンフリクトが解消されました。マージをコミットします".to_string(),
        }
    }

    /// Table for a locale tag such as `ja_JP.UTF-8`; unknown tags get English
    pub fn for_locale(locale: Option<&str>) -> Self {
        match locale.map(|l| l.to_ascii_lowercase()) {
            Some(l) if l.starts_with("ja") => Self::japanese(),
            _ => Self::english(),
        }
    }

    /// Locale from `LC_ALL`, `LC_MESSAGES` or `LANG`, in that order
    pub fn detect_locale() -> Option<String> {
        ["LC_ALL", "LC_MESSAGES", "LANG"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|value| !value.is_empty())
    }
}
