use lopdf::{Dictionary, Document, Object, Stream};
use pdf_stamp::*;
use tempfile::NamedTempFile;

fn media_box(width: i64, height: i64) -> Object {
    Object::Array(vec![
        Object::Integer(0),
        Object::Integer(0),
        Object::Integer(width),
        Object::Integer(height),
    ])
}

/// Build a document whose pages carry the given MediaBox, or none.
///
/// `inherited` is put on the page tree root so boxless pages pick it up.
fn create_test_pdf(page_boxes: &[Option<(i64, i64)>], inherited: Option<(i64, i64)>) -> Document {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let mut kids = Vec::new();
    for page_box in page_boxes {
        let content_id = doc.add_object(Stream::new(Dictionary::new(), b"q Q".to_vec()));
        let mut page = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            ("Resources", Object::Dictionary(Dictionary::new())),
            ("Contents", Object::Reference(content_id)),
        ]);
        if let Some((width, height)) = page_box {
            page.set("MediaBox", media_box(*width, *height));
        }
        kids.push(Object::Reference(doc.add_object(page)));
    }

    let mut pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(page_boxes.len() as i64)),
    ]);
    if let Some((width, height)) = inherited {
        pages_dict.set("MediaBox", media_box(width, height));
    }
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", Object::Reference(catalog_id));
    doc
}

fn write_pdf(doc: &mut Document) -> NamedTempFile {
    let temp = NamedTempFile::new().unwrap();
    let mut writer = Vec::new();
    doc.save_to(&mut writer).unwrap();
    std::fs::write(temp.path(), writer).unwrap();
    temp
}

#[test]
fn test_page_dimensions_from_document() {
    let doc = create_test_pdf(&[Some((612, 792)), Some((842, 595))], None);
    let info = DocumentInfo::from_document(&doc);
    assert_eq!(info.page_count(), 2);
    assert_eq!(info.page_size(1), Some(PageSize::new(612.0, 792.0)));
    assert_eq!(info.page_size(2), Some(PageSize::new(842.0, 595.0)));
}

#[test]
fn test_media_box_inherited_from_page_tree() {
    let doc = create_test_pdf(&[None, Some((200, 300))], Some((595, 842)));
    let info = DocumentInfo::from_document(&doc);
    assert_eq!(info.page_size(1), Some(PageSize::new(595.0, 842.0)));
    assert_eq!(info.page_size(2), Some(PageSize::new(200.0, 300.0)));
}

#[test]
fn test_missing_media_box_falls_back_to_letter() {
    let doc = create_test_pdf(&[None], None);
    let pages = doc.get_pages();
    let page_id = pages[&1];
    assert_eq!(get_page_dimensions(&doc, page_id), (612.0, 792.0));
}

#[tokio::test]
async fn test_load_document_info() {
    let mut doc = create_test_pdf(&[Some((612, 792)); 5], None);
    let temp = write_pdf(&mut doc);

    let info = load_document_info(temp.path()).await.unwrap();
    assert_eq!(info.page_count(), 5);

    let params =
        StampParameters::text("DRAFT").update_field(StampField::PageSelection("2n-1".into()));
    let job = plan(params, &info, &AverageCharWidth).unwrap();
    assert_eq!(job.pages().as_slice(), &[1, 3, 5]);
}

#[tokio::test]
async fn test_load_missing_file_is_io_error() {
    let result = load_document_info("/nonexistent/path/to/file.pdf").await;
    assert!(matches!(result, Err(StampError::Io(_))));
}

#[tokio::test]
async fn test_load_garbage_is_pdf_error() {
    let temp = NamedTempFile::new().unwrap();
    std::fs::write(temp.path(), b"definitely not a pdf").unwrap();

    let result = load_document_info(temp.path()).await;
    assert!(matches!(result, Err(StampError::Pdf(_))));
}

fn set_rotate(doc: &mut Document, id: lopdf::ObjectId, degrees: i64) {
    doc.get_object_mut(id)
        .and_then(Object::as_dict_mut)
        .unwrap()
        .set("Rotate", Object::Integer(degrees));
}

#[test]
fn test_quarter_turn_rotation_swaps_dimensions() {
    let mut doc = create_test_pdf(&[Some((612, 792)), Some((612, 792)), Some((612, 792))], None);
    let pages = doc.get_pages();
    set_rotate(&mut doc, pages[&1], 90);
    set_rotate(&mut doc, pages[&2], 180);
    set_rotate(&mut doc, pages[&3], -90);

    assert_eq!(get_page_rotation(&doc, pages[&1]), 90);
    assert_eq!(get_page_rotation(&doc, pages[&3]), 270);

    let info = DocumentInfo::from_document(&doc);
    assert_eq!(info.page_size(1), Some(PageSize::new(792.0, 612.0)));
    assert_eq!(info.page_size(2), Some(PageSize::new(612.0, 792.0)));
    assert_eq!(info.page_size(3), Some(PageSize::new(792.0, 612.0)));
}

#[test]
fn test_rotation_inherited_from_page_tree() {
    let mut doc = create_test_pdf(&[Some((612, 792))], None);
    let page_id = doc.get_pages()[&1];
    let pages_id = doc
        .get_dictionary(page_id)
        .and_then(|page| page.get(b"Parent"))
        .and_then(Object::as_reference)
        .unwrap();
    set_rotate(&mut doc, pages_id, 270);

    assert_eq!(get_page_rotation(&doc, page_id), 270);
    assert_eq!(get_page_dimensions(&doc, page_id), (792.0, 612.0));
}
