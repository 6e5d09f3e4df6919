// tests/wire_format.rs
//! Decoding real API payloads and re-encoding them.

use notion_blocks::{
    parse_blocks_pagination, plain_text, ApiResponse, Block, BlockKind, Color, FileObject, Icon,
    LinkToPage, Mention, PaginatedResponse, Parent, RichTextContent, SyncedFrom,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

const CHILDREN_PAGE: &str = include_str!("fixtures/api_responses/block_children_page.json");

fn fixture() -> PaginatedResponse<Block> {
    parse_blocks_pagination(ApiResponse {
        data: CHILDREN_PAGE.to_string(),
        status: reqwest::StatusCode::OK,
        url: "https://api.notion.com/v1/blocks/59833787-2cf9-4fdf-8782-e53db20768a5/children"
            .to_string(),
    })
    .expect("fixture should parse")
}

fn find<'a>(blocks: &'a [Block], block_type: &str) -> &'a Block {
    blocks
        .iter()
        .find(|block| block.block_type() == block_type)
        .unwrap_or_else(|| panic!("no {} in fixture", block_type))
}

fn by_id<'a>(blocks: &'a [Block], id: &str) -> &'a Block {
    blocks
        .iter()
        .find(|block| block.id().map(|block_id| block_id.as_str()) == Some(id))
        .unwrap_or_else(|| panic!("no block {} in fixture", id))
}

fn assert_no_nulls(value: &Value, path: &str) {
    match value {
        Value::Null => panic!("null at {}", path),
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                assert_no_nulls(item, &format!("{}[{}]", path, i));
            }
        }
        Value::Object(fields) => {
            for (key, field) in fields {
                assert_no_nulls(field, &format!("{}.{}", path, key));
            }
        }
        _ => {}
    }
}

#[test]
fn fixture_decodes_every_block() {
    let page = fixture();

    assert_eq!(page.results.len(), 19);
    assert!(!page.has_more);
    assert_eq!(page.continuation(), None);

    let types: Vec<&str> = page.results.iter().map(Block::block_type).collect();
    assert_eq!(
        types,
        vec![
            "paragraph",
            "heading_2",
            "to_do",
            "callout",
            "code",
            "image",
            "table",
            "column_list",
            "child_page",
            "synced_block",
            "link_to_page",
            "bookmark",
            "divider",
            "unsupported",
            "ai_block",
            "quote",
            "callout",
            "link_to_page",
            "pdf",
        ]
    );
}

#[test]
fn paragraph_spans_keep_their_content_kinds() {
    let page = fixture();
    let paragraph = find(&page.results, "paragraph");

    assert_eq!(
        paragraph.common.parent,
        Some(Parent::page("59833787-2cf9-4fdf-8782-e53db20768a5"))
    );
    assert!(paragraph.common.created_time.is_some());

    let BlockKind::Paragraph(body) = &paragraph.kind else {
        panic!("expected paragraph, got {:?}", paragraph.kind);
    };
    assert_eq!(plain_text(&body.rich_text), "Lacinato kale grows@Anonymouse=mc^2");
    assert_eq!(
        body.rich_text[0]
            .annotations
            .as_ref()
            .map(|a| (a.bold, a.color.clone())),
        Some((true, Color::Green))
    );
    assert_eq!(
        body.rich_text[1].href.as_deref(),
        Some("https://en.wikipedia.org/wiki/Lacinato_kale")
    );
    assert!(matches!(
        &body.rich_text[2].content,
        RichTextContent::Mention {
            mention: Mention::User { .. }
        }
    ));
    assert!(matches!(
        &body.rich_text[3].content,
        RichTextContent::Equation { .. }
    ));
}

#[test]
fn payload_specific_fields_are_typed() {
    let page = fixture();
    let blocks = &page.results;

    match &find(blocks, "heading_2").kind {
        BlockKind::Heading2(heading) => {
            assert!(heading.is_toggleable);
            assert_eq!(heading.color, Color::BlueBackground);
        }
        other => panic!("unexpected {:?}", other),
    }
    match &find(blocks, "callout").kind {
        BlockKind::Callout(callout) => assert_eq!(callout.icon, Some(Icon::emoji("🥬"))),
        other => panic!("unexpected {:?}", other),
    }
    match &find(blocks, "image").kind {
        BlockKind::Image(image) => {
            assert!(matches!(image.source, FileObject::File { .. }));
            assert!(image.source.url().ends_with("kale.png"));
        }
        other => panic!("unexpected {:?}", other),
    }
    match &find(blocks, "table").kind {
        BlockKind::Table(table) => {
            assert_eq!(table.table_width, 2);
            assert!(table.has_column_header);
            assert!(table.children.is_empty());
        }
        other => panic!("unexpected {:?}", other),
    }
    match &find(blocks, "synced_block").kind {
        BlockKind::Synced(synced) => assert!(matches!(
            synced.synced_from,
            Some(SyncedFrom::BlockId { .. })
        )),
        other => panic!("unexpected {:?}", other),
    }
    assert!(matches!(
        find(blocks, "link_to_page").kind,
        BlockKind::LinkToPage(LinkToPage::PageId { .. })
    ));
    assert!(find(blocks, "child_page").children().is_none());
}

#[test]
fn unknown_types_survive_a_round_trip_verbatim() {
    let page = fixture();
    let unknown = find(&page.results, "ai_block");

    match &unknown.kind {
        BlockKind::Unsupported(raw) => assert_eq!(raw.block_type, "ai_block"),
        other => panic!("expected catch-all, got {:?}", other),
    }

    let encoded = serde_json::to_value(unknown).unwrap();
    assert_eq!(
        encoded["ai_block"],
        json!({"prompt": "Summarize", "generated": [1, 2, 3], "nested": {"keep": true}})
    );
    assert_eq!(encoded["type"], json!("ai_block"));
}

#[test]
fn unmodelled_sub_types_decode_and_re_encode_verbatim() {
    let page = fixture();
    let blocks = &page.results;
    let raw: Value = serde_json::from_str(CHILDREN_PAGE).unwrap();
    let raw_block = |id: &str| {
        raw["results"]
            .as_array()
            .unwrap()
            .iter()
            .find(|block| block["id"] == json!(id))
            .cloned()
            .unwrap()
    };

    let quote = by_id(blocks, "a1b2c3d4-0000-4000-8000-000000000016");
    assert_eq!(quote.common.parent.as_ref().map(Parent::kind), Some("data_source_id"));
    let BlockKind::Quote(body) = &quote.kind else {
        panic!("expected quote, got {:?}", quote.kind);
    };
    assert_eq!(body.color, Color::Other("default_background".to_string()));
    let RichTextContent::Mention { mention } = &body.rich_text[0].content else {
        panic!("expected mention, got {:?}", body.rich_text[0].content);
    };
    assert!(matches!(mention, Mention::Other(_)));
    assert_eq!(mention.kind(), "link_mention");

    let encoded = serde_json::to_value(quote).unwrap();
    let original = raw_block("a1b2c3d4-0000-4000-8000-000000000016");
    assert_eq!(encoded["parent"], original["parent"]);
    assert_eq!(
        encoded["quote"]["rich_text"][0]["mention"],
        json!({"type": "link_mention", "link_mention": {"href": "https://github.com", "title": "GitHub"}})
    );
    assert_eq!(encoded["quote"]["color"], json!("default_background"));

    let callout = by_id(blocks, "a1b2c3d4-0000-4000-8000-000000000017");
    match &callout.kind {
        BlockKind::Callout(body) => {
            let icon = body.icon.as_ref().unwrap();
            assert!(matches!(icon, Icon::Other(_)));
            assert_eq!(icon.kind(), "custom_emoji");
        }
        other => panic!("unexpected {:?}", other),
    }
    assert_eq!(
        serde_json::to_value(callout).unwrap()["callout"]["icon"],
        raw_block("a1b2c3d4-0000-4000-8000-000000000017")["callout"]["icon"]
    );

    let link = by_id(blocks, "a1b2c3d4-0000-4000-8000-000000000018");
    assert!(matches!(
        &link.kind,
        BlockKind::LinkToPage(LinkToPage::CommentId { comment_id })
            if comment_id == "7b8c3f2e-0000-4000-8000-00000000c0de"
    ));

    let pdf = by_id(blocks, "a1b2c3d4-0000-4000-8000-000000000019");
    match &pdf.kind {
        BlockKind::Pdf(file) => {
            assert_eq!(file.source.kind(), "file_upload");
            assert_eq!(file.source.url(), "");
        }
        other => panic!("unexpected {:?}", other),
    }
    assert_eq!(
        serde_json::to_value(pdf).unwrap()["pdf"],
        json!({"type": "file_upload", "file_upload": {"id": "1a2b3c4d-0000-4000-8000-00000000f11e"}})
    );
}

#[test]
fn re_encoding_is_lossless_and_null_free() {
    let page = fixture();

    for block in &page.results {
        let encoded = serde_json::to_value(block).unwrap();
        assert_no_nulls(&encoded, block.block_type());

        let fields = encoded.as_object().unwrap();
        let payload_keys = fields
            .keys()
            .filter(|key| key.as_str() == block.block_type())
            .count();
        assert_eq!(payload_keys, 1, "{}", block.block_type());

        let decoded: Block = serde_json::from_value(encoded).unwrap();
        assert_eq!(&decoded, block);
    }
}
