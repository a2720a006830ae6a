//! Rule battery tests against whole workflow documents

use std::collections::BTreeSet;
use uilint::parser::xml::local_tag;
use uilint::{Category, Document, Finding, Lang, RuleEngine, RuleId, RuleSettings};

const HEADER: &str = r#"<Activity mc:Ignorable="sap2010" x:Class="Test" xmlns="http://schemas.microsoft.com/netfx/2009/xaml/activities" xmlns:mc="http://schemas.openxmlformats.org/markup-compatibility/2006" xmlns:sap2010="http://schemas.microsoft.com/netfx/2010/xaml/activities/presentation" xmlns:ui="http://schemas.uipath.com/workflow/activities" xmlns:x="http://schemas.microsoft.com/winfx/2006/xaml">"#;

fn parse(body: &str) -> Document {
    Document::parse(&format!("{}{}</Activity>", HEADER, body)).expect("valid workflow")
}

fn check_with(body: &str, stored: &[&str]) -> Vec<Finding> {
    let stored: BTreeSet<String> = stored.iter().map(|s| s.to_string()).collect();
    RuleEngine::default()
        .check(&parse(body), &stored)
        .expect("built-in queries are valid")
        .findings
}

fn check(body: &str) -> Vec<Finding> {
    check_with(body, &[])
}

fn rules(findings: &[Finding]) -> Vec<RuleId> {
    findings.iter().map(|f| f.rule).collect()
}

// ============================================================================
// Screenshots
// ============================================================================

const CLICK_WITH_SCREENSHOT: &str = r#"<Sequence DisplayName="Main">
  <ui:Click DisplayName="Click 'OK'">
    <ui:Click.Target>
      <ui:Target InformativeScreenshot="abc123" Selector="&lt;wnd app='notepad.exe' /&gt;" />
    </ui:Click.Target>
  </ui:Click>
</Sequence>"#;

#[test]
fn test_missing_screenshot_reported() {
    let findings = check(CLICK_WITH_SCREENSHOT);

    assert_eq!(rules(&findings), vec![RuleId::NoScreenshots]);
    assert_eq!(
        findings[0].message(Lang::En),
        "Informative screenshot is missing (Activity: Click 'OK', Screenshot: abc123)"
    );
}

#[test]
fn test_stored_screenshot_not_reported() {
    let findings = check_with(CLICK_WITH_SCREENSHOT, &["abc123"]);
    assert!(findings.is_empty(), "unexpected findings: {:?}", findings);
}

// ============================================================================
// Activities and structure
// ============================================================================

#[test]
fn test_commented_out_activities_are_ignored() {
    let findings = check(
        r#"<Sequence DisplayName="Main">
  <ui:CommentOut DisplayName="Comment Out">
    <ui:CommentOut.Body>
      <Sequence DisplayName="Ignored Activities">
        <ui:MessageBox Text="debug" />
        <TerminateWorkflow Reason="stop" />
      </Sequence>
    </ui:CommentOut.Body>
  </ui:CommentOut>
  <ui:LogMessage Message="done" />
</Sequence>"#,
    );
    assert!(findings.is_empty(), "unexpected findings: {:?}", findings);
}

#[test]
fn test_empty_sequence() {
    assert_eq!(rules(&check("<Sequence />")), vec![RuleId::EmptySequence]);
    assert!(check(r#"<Sequence><ui:LogMessage Message="x" /></Sequence>"#).is_empty());
}

#[test]
fn test_sequence_with_only_variables_is_empty() {
    let findings = check(
        r#"<Sequence DisplayName="Init">
  <Sequence.Variables><Variable x:TypeArguments="x:Int32" Name="count" /></Sequence.Variables>
</Sequence>"#,
    );
    assert_eq!(rules(&findings), vec![RuleId::EmptySequence]);
}

#[test]
fn test_oversized_sequence_is_a_warning() {
    let body: String = (0..16)
        .map(|i| format!(r#"<ui:LogMessage DisplayName="Log {}" Message="x" />"#, i))
        .collect();
    let findings = check(&format!(r#"<Sequence DisplayName="Big">{}</Sequence>"#, body));

    assert_eq!(rules(&findings), vec![RuleId::MaxActivities]);
    assert_eq!(findings[0].category, Category::Warning);
}

#[test]
fn test_threshold_from_settings() {
    let engine = RuleEngine::new(RuleSettings {
        max_sequence_activities: 20,
        ..RuleSettings::default()
    });
    let body: String = (0..16).map(|_| r#"<ui:LogMessage Message="x" />"#).collect();
    let doc = parse(&format!("<Sequence>{}</Sequence>", body));

    let output = engine.check(&doc, &BTreeSet::new()).unwrap();
    assert!(output.findings.is_empty());
}

#[test]
fn test_looped_flowchart_step() {
    let findings = check(
        r#"<Flowchart DisplayName="Retry">
  <Flowchart.StartNode><x:Reference>__ReferenceID0</x:Reference></Flowchart.StartNode>
  <FlowStep x:Name="__ReferenceID0">
    <sap2010:WorkflowViewState.IdRef>FlowStep_1</sap2010:WorkflowViewState.IdRef>
    <ui:Click DisplayName="Click Retry" />
    <FlowStep.Next><x:Reference>__ReferenceID0</x:Reference></FlowStep.Next>
  </FlowStep>
</Flowchart>"#,
    );

    assert_eq!(rules(&findings), vec![RuleId::LoopedActivity]);
    assert_eq!(findings[0].details[0].value.as_deref(), Some("Click Retry"));
}

#[test]
fn test_deeply_nested_if() {
    let findings = check(
        r#"<If Condition="[a]" DisplayName="Level 1"><If.Then>
  <If Condition="[b]" DisplayName="Level 2"><If.Then>
    <If Condition="[c]" DisplayName="Level 3"><If.Then>
      <ui:LogMessage Message="x" />
    </If.Then></If>
  </If.Then></If>
</If.Then></If>"#,
    );

    assert_eq!(rules(&findings), vec![RuleId::NestedIf]);
    assert_eq!(
        findings[0].message(Lang::En),
        "If activities are nested too deeply (If: Level 3, Condition: [c])"
    );
}

#[test]
fn test_empty_catch() {
    let findings = check(
        r#"<TryCatch DisplayName="Try Catch">
  <TryCatch.Try><ui:Click DisplayName="Click" /></TryCatch.Try>
  <TryCatch.Catches>
    <Catch x:TypeArguments="s:Exception">
      <ActivityAction x:TypeArguments="s:Exception">
        <ActivityAction.Argument><DelegateInArgument Name="exception" /></ActivityAction.Argument>
      </ActivityAction>
    </Catch>
  </TryCatch.Catches>
</TryCatch>"#,
    );
    assert_eq!(rules(&findings), vec![RuleId::EmptyCatch]);
}

// ============================================================================
// Excel and launched applications
// ============================================================================

#[test]
fn test_visible_excel_scope_with_workbook_activity() {
    let findings = check(
        r#"<ui:ExcelApplicationScope DisplayName="Open Report" WorkbookPath="report.xlsx">
  <ui:ExcelApplicationScope.Body>
    <ActivityAction x:TypeArguments="ui:WorkbookApplication">
      <Sequence DisplayName="Do">
        <ui:ExcelReadRange DisplayName="Read Range" />
        <ui:ReadRange DisplayName="Workbook Read Range" WorkbookPath="report.xlsx" />
      </Sequence>
    </ActivityAction>
  </ui:ExcelApplicationScope.Body>
</ui:ExcelApplicationScope>"#,
    );

    assert_eq!(rules(&findings), vec![RuleId::NoVisibleExcel, RuleId::WorkbookInExcel]);
    assert_eq!(
        findings[1].message(Lang::En),
        "Workbook activity is used inside Excel Application Scope (Excel Application Scope: Open Report, Activity: Workbook Read Range)"
    );
}

#[test]
fn test_launching_word_by_path() {
    let findings = check(
        r#"<ui:StartProcess DisplayName="Start Word" FileName="C:\Program Files\Microsoft Office\winword.exe" />"#,
    );
    assert_eq!(rules(&findings), vec![RuleId::RunWord]);
}

#[test]
fn test_launch_reports_each_product() {
    let findings = check(
        r#"<ui:OpenApplication DisplayName="Open" FileName="C:\tools\excel.exe --with chrome.exe" />"#,
    );
    assert_eq!(rules(&findings), vec![RuleId::RunExcel, RuleId::RunBrowser]);
}

// ============================================================================
// Hotkeys and typing
// ============================================================================

#[test]
fn test_hotkey_rules() {
    let findings = check(
        r#"<ui:WindowScope DisplayName="Notepad">
  <ui:WindowScope.Body>
    <ActivityAction x:TypeArguments="x:Object">
      <Sequence>
        <ui:SendHotkey DisplayName="Send enter" Key="enter" SpecialKey="False" />
        <ui:SendHotkey DisplayName="Close" Key="f4" KeyModifiers="Alt" SpecialKey="True" />
      </Sequence>
    </ActivityAction>
  </ui:WindowScope.Body>
</ui:WindowScope>"#,
    );
    assert_eq!(rules(&findings), vec![RuleId::FalseSpecialKey, RuleId::NoAltF4]);
}

#[test]
fn test_hotkey_without_selector_outside_scope() {
    let findings = check(
        r#"<Sequence DisplayName="Main">
  <ui:SendHotkey DisplayName="Save" Key="s" KeyModifiers="Ctrl" SpecialKey="False">
    <ui:SendHotkey.Target><ui:Target Selector="{x:Null}" /></ui:SendHotkey.Target>
  </ui:SendHotkey>
  <ui:SendHotkey DisplayName="Nothing" Key="{x:Null}" />
</Sequence>"#,
    );

    assert_eq!(
        rules(&findings),
        vec![RuleId::EmptySpecialKey, RuleId::EmptySelectorSendHotkey]
    );
    assert_eq!(findings[1].category, Category::Warning);
}

#[test]
fn test_kana_in_type_into() {
    let findings = check(
        r#"<Sequence>
  <ui:TypeInto DisplayName="Type name" Text="ｶﾀｶﾅ" />
  <ui:TypeInto DisplayName="Type expr" Text="[customerName]" />
  <ui:TypeInto DisplayName="Simulated" Text="ｶﾀｶﾅ" SimulateType="True" />
</Sequence>"#,
    );

    assert_eq!(rules(&findings), vec![RuleId::KanaTypeInto, RuleId::KanaTypeIntoVb]);
    assert_eq!(findings[1].category, Category::Warning);
}

// ============================================================================
// Conditions and selectors
// ============================================================================

#[test]
fn test_and_outside_quotes_is_reported() {
    let findings = check(r#"<If Condition='a="x and y" And b' />"#);
    assert_eq!(rules(&findings), vec![RuleId::NoAndOr]);
}

#[test]
fn test_and_inside_quotes_is_not_reported() {
    assert!(check(r#"<If Condition='a="x and y"' />"#).is_empty());
    assert!(check(r#"<While Condition="[a AndAlso b]" />"#).is_empty());
}

#[test]
fn test_fragile_selectors() {
    let findings = check(
        r#"<Sequence>
  <ui:Click DisplayName="Click Save">
    <ui:Click.Target>
      <ui:Target Selector="&lt;wnd app='excel.exe' title='Book1.xlsx' /&gt;&lt;ctrl cls='WindowsForms10.BUTTON.app.0.2bf8098_r9_ad1' /&gt;" />
    </ui:Click.Target>
  </ui:Click>
  <ui:Click DisplayName="Click Omitted">
    <ui:Click.Target>
      <ui:Target Selector="&lt;wnd app='excel.exe' omit:title='Book1.xlsx' /&gt;" />
    </ui:Click.Target>
  </ui:Click>
</Sequence>"#,
    );

    assert_eq!(
        rules(&findings),
        vec![RuleId::SelectorExtensions, RuleId::SelectorWindowsForms]
    );
    assert!(findings
        .iter()
        .all(|f| f.details[0].value.as_deref() == Some("Click Save")));
}

// ============================================================================
// Engine properties
// ============================================================================

#[test]
fn test_repeated_checks_match() {
    let doc = parse(CLICK_WITH_SCREENSHOT);
    let engine = RuleEngine::default();
    let stored = BTreeSet::new();

    let first = engine.check(&doc, &stored).unwrap();
    let second = engine.check(&doc, &stored).unwrap();
    assert_eq!(first, second);
    assert!(first.has_error);
}

#[test]
fn test_disabled_rules() {
    let engine = RuleEngine::default().with_disabled([RuleId::NoScreenshots]);
    let output = engine.check(&parse(CLICK_WITH_SCREENSHOT), &BTreeSet::new()).unwrap();
    assert!(output.findings.is_empty());
    assert!(!output.has_error);
}

#[test]
fn test_local_tag_ignores_namespace_wrapper() {
    assert_eq!(
        local_tag("{http://schemas.uipath.com/workflow/activities}Click"),
        local_tag("Click")
    );
    assert_eq!(local_tag("ui:Click"), "Click");
}
