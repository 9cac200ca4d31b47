//! Markup of the results region.

use fitcheck_ui::html::{badge, escape, list_item};

use crate::model::AnalysisResult;

/// Render an analysis result.
///
/// Colors become one badge each and outfits one list item each, both in
/// the order the server sent them.
pub fn analysis(result: &AnalysisResult) -> String {
    let colors: String = result
        .recommendations
        .colors
        .iter()
        .map(|c| badge(c))
        .collect();
    let outfits: String = result
        .recommendations
        .outfits
        .iter()
        .map(|o| list_item(o))
        .collect();

    format!(
        r#"<h3 class="card-title">Your Fashion Analysis</h3>
<div class="row mt-3">
    <div class="col-md-6">
        <h5>Body Type</h5>
        <p class="fs-5">{body_type}</p>
        <h5>Skin Tone</h5>
        <p class="fs-5">{skin_tone}</p>
    </div>
    <div class="col-md-6">
        <h5>Recommended Colors</h5>
        <div class="d-flex flex-wrap gap-2">{colors}</div>
    </div>
</div>
<h5 class="mt-3">Outfit Suggestions</h5>
<ul class="list-group">{outfits}</ul>"#,
        body_type = escape(&result.body_type),
        skin_tone = escape(&result.skin_tone),
    )
}
