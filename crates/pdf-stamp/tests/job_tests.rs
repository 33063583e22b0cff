use std::sync::Arc;

use pdf_stamp::*;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 0.01
}

fn letter_document(pages: u32) -> DocumentInfo {
    DocumentInfo::uniform(pages, PageSize::default())
}

#[test]
fn test_plan_selected_pages() {
    let params =
        StampParameters::text("DRAFT").update_field(StampField::PageSelection("4-8,2,10-12".into()));
    let job = plan(params, &letter_document(10), &AverageCharWidth).unwrap();

    assert_eq!(job.pages().as_slice(), &[2, 4, 5, 6, 7, 8, 9, 10]);
    let placed: Vec<u32> = job.placements().iter().map(|p| p.page).collect();
    assert_eq!(placed, job.pages().as_slice());
}

#[test]
fn test_blank_selection_plans_every_page() {
    let job = plan(
        StampParameters::text("COPY"),
        &letter_document(3),
        &AverageCharWidth,
    )
    .unwrap();
    assert_eq!(job.pages().as_slice(), &[1, 2, 3]);
}

#[test]
fn test_each_page_uses_its_own_size() {
    let document = DocumentInfo::new(vec![
        PageSize::new(612.0, 792.0),
        PageSize::new(842.0, 595.0),
    ]);
    let job = plan(StampParameters::text("X"), &document, &AverageCharWidth).unwrap();

    let first = job.placement_for(1).unwrap();
    let second = job.placement_for(2).unwrap();
    let (x1, y1) = first.geometry.center();
    let (x2, y2) = second.geometry.center();
    assert!(approx(x1, 306.0) && approx(y1, 396.0));
    assert!(approx(x2, 421.0) && approx(y2, 297.5));
    assert_eq!(second.page_size, PageSize::new(842.0, 595.0));
}

#[test]
fn test_plan_rejects_invalid_parameters() {
    let document = letter_document(5);

    assert_eq!(
        plan(StampParameters::text("  "), &document, &AverageCharWidth),
        Err(ValidationError::MissingText)
    );

    let params = StampParameters::text("ok").update_field(StampField::Rotation(200.0));
    assert!(matches!(
        plan(params, &document, &AverageCharWidth),
        Err(ValidationError::OutOfRangeNumeric {
            field: NumericField::Rotation,
            ..
        })
    ));

    let params = StampParameters::text("ok").update_field(StampField::PageSelection("6".into()));
    assert!(matches!(
        plan(params, &document, &AverageCharWidth),
        Err(ValidationError::BadSelection(SelectionError::Resolve(
            ResolveError::OutOfRange { page: 6, .. }
        )))
    ));
}

#[test]
fn test_empty_document_has_nothing_to_stamp() {
    assert_eq!(
        plan(
            StampParameters::text("ok"),
            &DocumentInfo::default(),
            &AverageCharWidth
        ),
        Err(ValidationError::BadSelection(SelectionError::Resolve(
            ResolveError::EmptySelection
        )))
    );
}

#[test]
fn test_job_is_a_snapshot() {
    let params = Arc::new(StampParameters::text("v1"));
    let job = plan(Arc::clone(&params), &letter_document(2), &AverageCharWidth).unwrap();

    // Editing produces a new record; the planned job still sees the old one
    let edited = params.update_field(StampField::StampText("v2".into()));
    let replanned = plan(edited, &letter_document(2), &AverageCharWidth).unwrap();

    assert_eq!(job.parameters().stamp_text(), "v1");
    assert_eq!(replanned.parameters().stamp_text(), "v2");
    assert_eq!(params.stamp_text(), "v1");
}

#[test]
fn test_plan_is_deterministic() {
    let params = StampParameters::image(StampImage::new("a.png", vec![9u8; 4], 30, 60))
        .update_fields([
            StampField::PositionMode(PositionMode::Custom),
            StampField::CustomPoint(NormalizedPoint::new(0.2, 0.8)),
            StampField::PageSelection("n".into()),
        ]);
    let document = letter_document(4);
    assert_eq!(
        plan(params.clone(), &document, &AverageCharWidth),
        plan(params, &document, &AverageCharWidth)
    );
}

#[cfg(feature = "serde")]
#[test]
fn test_job_serializes_for_collaborators() {
    let params =
        StampParameters::text("PAID").update_field(StampField::PageSelection("1,3".into()));
    let job = plan(params, &letter_document(3), &AverageCharWidth).unwrap();

    let value = serde_json::to_value(&job).unwrap();
    assert_eq!(value["pages"], serde_json::json!([1, 3]));
    assert_eq!(value["placements"].as_array().unwrap().len(), 2);
    assert_eq!(value["placements"][1]["page"], 3);
    assert_eq!(value["parameters"]["stamp_text"], "PAID");
    assert!(value["placements"][0]["geometry"]["rotation_degrees"].is_number());
}
