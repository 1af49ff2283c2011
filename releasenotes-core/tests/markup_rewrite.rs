use chrono::NaiveDate;
use releasenotes_core::locale::Locale;
use releasenotes_core::markup::{rewrite, LinkPolicy, MarkupPipeline, RewriteStep, CUTOFF_DATE};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn bare_anchor_target_becomes_href() {
    let out = RewriteStep::NormalizeAnchorHref
        .apply(r#"- see <a https://dev.example.com/openapi">docs</a>"#);
    assert_eq!(out, r#"- see <a href="https://dev.example.com/openapi">docs</a>"#);
}

#[test]
fn anchor_with_href_is_left_alone_and_rewrite_is_idempotent() {
    let input = r#"<a href="/x" target="_blank">x</a> and <a href="/y">y</a>"#;
    let once = RewriteStep::NormalizeAnchorHref.apply(input);
    assert_eq!(once, input);
    assert_eq!(RewriteStep::NormalizeAnchorHref.apply(&once), once);
}

#[test]
fn bare_anchor_fix_is_idempotent_after_first_pass() {
    let once = RewriteStep::NormalizeAnchorHref.apply(r#"<a /one">1</a><a /two">2</a>"#);
    assert_eq!(once, r#"<a href="/one">1</a><a href="/two">2</a>"#);
    assert_eq!(RewriteStep::NormalizeAnchorHref.apply(&once), once);
}

#[test]
fn unterminated_anchor_is_not_touched() {
    let input = "<a https://example.com";
    assert_eq!(RewriteStep::NormalizeAnchorHref.apply(input), input);
}

#[test]
fn every_line_break_is_self_closed() {
    let out = RewriteStep::SelfCloseLineBreaks.apply("a<br><br>b<br />c<br>");
    assert_eq!(out, "a<br /><br />b<br />c<br />");
}

#[test]
fn classic_pipeline_leaves_code_tags_alone() {
    let input = "<makr>x</makr> <code>{}</code>";
    assert_eq!(MarkupPipeline::classic().apply(input), input);
}

#[test]
fn extended_pipeline_applies_code_and_class_shims() {
    let pipeline = MarkupPipeline::extended();
    assert_eq!(pipeline.apply("<makr>nmId</makr>"), "<code>nmId</code>");
    assert_eq!(
        pipeline.apply(r#"<code>{"id": 1}</code>"#),
        r#"<code>&#123;"id": 1&#125;</code>"#
    );
    assert_eq!(
        pipeline.apply(r#"<a class="link" href="/x">x</a><br>"#),
        r#"<a className="link" href="/x">x</a><br />"#
    );
}

#[test]
fn pipeline_steps_are_ordered() {
    assert_eq!(
        MarkupPipeline::classic().steps(),
        &[RewriteStep::NormalizeAnchorHref, RewriteStep::SelfCloseLineBreaks]
    );
    assert_eq!(MarkupPipeline::extended().steps().len(), 5);
}

#[test]
fn policy_switches_on_cutoff_date() {
    assert_eq!(*CUTOFF_DATE, date(2024, 5, 8));
    assert_eq!(
        LinkPolicy::for_publish_date(date(2024, 5, 7), Locale::En),
        LinkPolicy::StripAnchors
    );
    assert_eq!(
        LinkPolicy::for_publish_date(date(2024, 5, 8), Locale::En),
        LinkPolicy::ResolveRepLinks(Locale::En)
    );
    assert_eq!(
        LinkPolicy::for_publish_date(date(2025, 1, 1), Locale::Cn),
        LinkPolicy::ResolveRepLinks(Locale::Cn)
    );
}

#[test]
fn strip_keeps_inner_text_of_each_anchor() {
    let out = LinkPolicy::StripAnchors
        .apply(r#"- use <a href="/a">first</a> and <a href="/b">second</a> now"#);
    assert_eq!(out, "- use first and second now");
}

#[test]
fn strip_leaves_unclosed_anchor() {
    let input = r#"<a href="/a">never closed"#;
    assert_eq!(LinkPolicy::StripAnchors.apply(input), input);
}

#[test]
fn replink_is_resolved_per_locale() {
    let input = r#"<a href="REPLINK/work-with-products/tag/Prices">t</a> <a href="https://x.io">x</a>"#;
    assert_eq!(
        LinkPolicy::ResolveRepLinks(Locale::En).apply(input),
        r#"<a href="/en/openapi/work-with-products/tag/Prices">t</a> <a href="https://x.io">x</a>"#
    );
    assert_eq!(
        LinkPolicy::ResolveRepLinks(Locale::Ru).apply(input),
        r#"<a href="/ru/openapi/work-with-products/tag/Prices">t</a> <a href="https://x.io">x</a>"#
    );
}

#[test]
fn full_rewrite_before_cutoff_strips_links() {
    let policy = LinkPolicy::for_publish_date(date(2024, 5, 7), Locale::Ru);
    assert_eq!(
        rewrite(r#"<a href="x">t</a>"#, &MarkupPipeline::classic(), policy),
        "t"
    );
}

#[test]
fn full_rewrite_on_cutoff_resolves_links() {
    let policy = LinkPolicy::for_publish_date(date(2024, 5, 8), Locale::En);
    assert_eq!(
        rewrite(r#"<a href="REPLINK/foo">t</a>"#, &MarkupPipeline::classic(), policy),
        r#"<a href="/en/openapi/foo">t</a>"#
    );
}

#[test]
fn bare_replink_anchor_is_normalised_then_resolved() {
    let policy = LinkPolicy::ResolveRepLinks(Locale::Cn);
    assert_eq!(
        rewrite(r#"<a REPLINK/foo">t</a>"#, &MarkupPipeline::classic(), policy),
        r#"<a href="/cn/openapi/foo">t</a>"#
    );
}
