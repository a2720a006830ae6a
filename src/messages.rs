//! Message catalog (English / Japanese)

use crate::analysis::RuleId;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    En,
    Ja,
}

impl FromStr for Lang {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" => Ok(Lang::En),
            "ja" => Ok(Lang::Ja),
            other => Err(format!("unsupported language: {}", other)),
        }
    }
}

/// Messages printed by the command line front end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Msg {
    DirectoryNotFound,
    NoWorkflows,
    RemoveScreenshots,
    RemoveScreenshot,
    CleanupSkipped,
}

pub fn text(msg: Msg, lang: Lang) -> &'static str {
    use Msg::*;
    match lang {
        Lang::En => match msg {
            DirectoryNotFound => "Project directory is not found or not a directory.",
            NoWorkflows => "No XAML files found in the project directory.",
            RemoveScreenshots => "Removing unused screenshots.",
            RemoveScreenshot => "Remove screenshot",
            CleanupSkipped => "Screenshots were not removed because some workflows could not be parsed.",
        },
        Lang::Ja => match msg {
            DirectoryNotFound => "プロジェクトのディレクトリが見つからないか、ディレクトリではありません。",
            NoWorkflows => "プロジェクトのディレクトリに XAML ファイルがありません。",
            RemoveScreenshots => "使用されていないスクリーンショットを削除します。",
            RemoveScreenshot => "スクリーンショットを削除",
            CleanupSkipped => "解析できないワークフローがあるため、スクリーンショットは削除されませんでした。",
        },
    }
}

pub fn rule_message(rule: RuleId, lang: Lang) -> &'static str {
    use RuleId::*;
    match lang {
        Lang::En => match rule {
            NoProjectFile => "project.json is not found",
            MalformedXml => "Workflow file is not well-formed XML",
            NoScreenshots => "Informative screenshot is missing",
            NoGetPassword => "GetPassword activity must not be used",
            MessageBox => "Message Box must not be left in a workflow",
            TerminateWorkflow => "Terminate Workflow must not be used",
            LoopedActivity => "Flowchart step loops back to itself",
            EmptySequence => "Sequence is empty",
            NestedSequence => "Sequence only wraps another Sequence",
            MaxActivities => "Sequence contains too many activities",
            EmptyCatch => "TryCatch has an empty Catch",
            NestedIf => "If activities are nested too deeply",
            NoVisibleExcel => "Excel Application Scope should not be visible",
            WorkbookInExcel => "Workbook activity is used inside Excel Application Scope",
            RunExcel => "Excel must be opened with Excel Application Scope, not Open Application/Start Process",
            RunWord => "Word must be opened with Word Application Scope, not Open Application/Start Process",
            RunBrowser => "Browsers must be opened with Open Browser, not Open Application/Start Process",
            FalseSpecialKey => "Special key is sent with SpecialKey disabled",
            EmptySpecialKey => "SendHotkey has no key",
            NoAltF4 => "Windows must be closed with Close Window, not Alt+F4",
            EmptySelectorSendHotkey => "SendHotkey outside a window scope has no selector",
            KanaTypeIntoVb => "TypeInto text is an expression and may contain half-width kana; enable SimulateType",
            KanaTypeInto => "TypeInto text contains half-width kana; enable SimulateType",
            NoAndOr => "Use AndAlso/OrElse instead of And/Or in conditions",
            SelectorExtensions => "Selector title depends on a file extension",
            SelectorWindowsForms => "Selector depends on a WindowsForms10 class name",
        },
        Lang::Ja => match rule {
            NoProjectFile => "project.json が見つかりません",
            MalformedXml => "ワークフローが整形式の XML ではありません",
            NoScreenshots => "スクリーンショットが見つかりません",
            NoGetPassword => "GetPassword アクティビティは使用できません",
            MessageBox => "メッセージボックスが残っています",
            TerminateWorkflow => "ワークフローの終了は使用できません",
            LoopedActivity => "フローチャートのステップが自分自身にループしています",
            EmptySequence => "空のシーケンスです",
            NestedSequence => "シーケンスが別のシーケンスだけを含んでいます",
            MaxActivities => "シーケンス内のアクティビティが多すぎます",
            EmptyCatch => "TryCatch に空の Catch があります",
            NestedIf => "条件分岐のネストが深すぎます",
            NoVisibleExcel => "Excel アプリケーションスコープは非表示にしてください",
            WorkbookInExcel => "Excel アプリケーションスコープ内でブックのアクティビティが使われています",
            RunExcel => "Excel はアプリケーションを開く/プロセスを開始ではなく Excel アプリケーションスコープで開いてください",
            RunWord => "Word はアプリケーションを開く/プロセスを開始ではなく Word アプリケーションスコープで開いてください",
            RunBrowser => "ブラウザーはアプリケーションを開く/プロセスを開始ではなくブラウザーを開くで開いてください",
            FalseSpecialKey => "SpecialKey が無効のまま特殊キーを送信しています",
            EmptySpecialKey => "ホットキーを送信のキーが空です",
            NoAltF4 => "Alt+F4 ではなくウィンドウを閉じるを使用してください",
            EmptySelectorSendHotkey => "ウィンドウスコープ外のホットキーを送信にセレクターがありません",
            KanaTypeIntoVb => "文字を入力のテキストが式のため半角カナを含む可能性があります。SimulateType を有効にしてください",
            KanaTypeInto => "文字を入力のテキストに半角カナが含まれています。SimulateType を有効にしてください",
            NoAndOr => "条件式では And/Or ではなく AndAlso/OrElse を使用してください",
            SelectorExtensions => "セレクターの title がファイルの拡張子に依存しています",
            SelectorWindowsForms => "セレクターが WindowsForms10 のクラス名に依存しています",
        },
    }
}
