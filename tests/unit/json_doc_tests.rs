/*!
 * Tests for the reference JSON backend: parsing, image payloads and
 * atomic finalize.
 */

use std::path::Path;

use doctran::document::json_doc::{JsonSink, JsonSource};
use doctran::document::model::BBox;
use doctran::document::{DocumentSink, DocumentSource};
use doctran::errors::{SinkError, SourceError};
use tempfile::TempDir;

// "hello" in base64
const HELLO_B64: &str = "aGVsbG8=";

fn sample_json() -> String {
    format!(
        r#"{{
            "title": "Sample Doc",
            "pages": [
                {{
                    "text": [
                        {{"bbox": {{"x0": 0.0, "y0": 0.0, "x1": 100.0, "y1": 20.0}}, "text": "Hello"}},
                        {{"bbox": {{"x0": 0.0, "y0": 25.0, "x1": 100.0, "y1": 45.0}}, "text": "World"}}
                    ],
                    "images": [
                        {{"bbox": {{"x0": 0.0, "y0": 50.0, "x1": 40.0, "y1": 90.0}}, "data": "{}"}}
                    ]
                }},
                {{}}
            ]
        }}"#,
        HELLO_B64
    )
}

#[test]
fn test_json_source_withSampleDocument_shouldExposePagesInOrder() {
    let source = JsonSource::from_str(&sample_json()).unwrap();

    assert_eq!(source.page_count(), 2);
    assert_eq!(source.title().as_deref(), Some("Sample Doc"));

    let blocks = source.text_blocks(0).unwrap();
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].1, "Hello");
    assert_eq!(blocks[1].1, "World");
    assert_eq!(blocks[0].0, BBox::new(0.0, 0.0, 100.0, 20.0));

    // A page without content parses to empty block lists
    assert!(source.text_blocks(1).unwrap().is_empty());
    assert!(source.image_refs(1).unwrap().is_empty());
}

#[test]
fn test_json_source_withImage_shouldDecodeBase64Payload() {
    let source = JsonSource::from_str(&sample_json()).unwrap();

    let refs = source.image_refs(0).unwrap();
    assert_eq!(refs.len(), 1);

    let bytes = source.decode_image(&refs[0]).unwrap();
    assert_eq!(bytes.as_ref(), b"hello");
}

#[test]
fn test_json_source_withInvalidBase64_shouldReportImageError() {
    let content = r#"{"pages": [{"images": [{"bbox": {"x0": 0.0, "y0": 0.0, "x1": 1.0, "y1": 1.0}, "data": "!!not base64!!"}]}]}"#;
    let source = JsonSource::from_str(content).unwrap();

    let refs = source.image_refs(0).unwrap();
    let err = source.decode_image(&refs[0]).unwrap_err();

    assert!(matches!(err, SourceError::Image(_)));
}

#[test]
fn test_json_source_withOutOfRangePage_shouldFail() {
    let source = JsonSource::from_str(&sample_json()).unwrap();

    let err = source.text_blocks(5).unwrap_err();

    assert!(matches!(
        err,
        SourceError::PageOutOfRange { page: 5, pages: 2 }
    ));
}

#[test]
fn test_json_source_withGarbageContent_shouldReportOpenError() {
    let err = JsonSource::from_str("this is not json").unwrap_err();

    assert!(matches!(err, SourceError::Open(_)));
}

#[test]
fn test_json_sink_withDrawBeforeAddPage_shouldReject() {
    let mut sink = JsonSink::new();

    let err = sink
        .draw_text(&BBox::new(0.0, 0.0, 10.0, 10.0), "orphan")
        .unwrap_err();

    assert!(matches!(err, SinkError::Render(_)));
}

#[test]
fn test_json_sink_withEmptyImagePayload_shouldReject() {
    let mut sink = JsonSink::new();
    sink.add_page().unwrap();

    let err = sink
        .draw_image(&BBox::new(0.0, 0.0, 10.0, 10.0), &[])
        .unwrap_err();

    assert!(matches!(err, SinkError::Render(_)));
}

#[test]
fn test_json_sink_finalize_shouldRoundTripThroughSource() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.json");

    let mut sink = JsonSink::new();
    sink.set_title("Título");
    sink.add_page().unwrap();
    sink.draw_text(&BBox::new(0.0, 0.0, 100.0, 20.0), "Hola").unwrap();
    sink.draw_image(&BBox::new(0.0, 30.0, 50.0, 80.0), b"hello").unwrap();
    sink.finalize(&path).unwrap();

    assert!(path.is_file());

    let reopened = JsonSource::open(&path).unwrap();
    assert_eq!(reopened.page_count(), 1);
    assert_eq!(reopened.title().as_deref(), Some("Título"));
    assert_eq!(reopened.text_blocks(0).unwrap()[0].1, "Hola");

    let refs = reopened.image_refs(0).unwrap();
    assert_eq!(reopened.decode_image(&refs[0]).unwrap().as_ref(), b"hello");
}

#[test]
fn test_json_source_open_withMissingFile_shouldReportOpenError() {
    let err = JsonSource::open(Path::new("/nonexistent/doc.json")).unwrap_err();

    assert!(matches!(err, SourceError::Open(_)));
}
