//! Wire encoding for [`Block`].
//!
//! The API spells a block as its common attributes, a `type` tag, and the
//! payload under a key equal to that tag:
//!
//! ```text
//! {"object": "block", "id": "...", "type": "quote", "quote": {"rich_text": [...]}}
//! ```
//!
//! Encoding emits exactly one payload key. Absent attributes are omitted,
//! never written as `null`.

use super::block::{match_payload, Block, BlockKind};
use super::common::BlockCommon;
use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Serializes a [`BlockKind`] as the single-entry map `{tag: payload}`.
///
/// Flattened into block bodies and update requests.
pub(crate) struct KeyedPayload<'a>(pub &'a BlockKind);

impl Serialize for KeyedPayload<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let key = self.0.block_type();
        let mut map = serializer.serialize_map(Some(1))?;
        match_payload!(
            self.0,
            payload => map.serialize_entry(key, payload)?,
            raw => map.serialize_entry(key, &raw.payload)?
        );
        map.end()
    }
}

#[derive(Serialize)]
struct WireBlock<'a> {
    #[serde(flatten)]
    common: &'a BlockCommon,
    #[serde(rename = "type")]
    block_type: &'a str,
    #[serde(flatten)]
    payload: KeyedPayload<'a>,
}

impl Serialize for Block {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        WireBlock {
            common: &self.common,
            block_type: self.kind.block_type(),
            payload: KeyedPayload(&self.kind),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Block {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut fields = Map::<String, Value>::deserialize(deserializer)?;

        let block_type = match fields.get("type") {
            Some(Value::String(tag)) => tag.clone(),
            Some(other) => {
                return Err(de::Error::invalid_type(
                    de::Unexpected::Other(&other.to_string()),
                    &"a block type string",
                ))
            }
            None => return Err(de::Error::missing_field("type")),
        };

        let payload = fields
            .remove(&block_type)
            .unwrap_or_else(|| Value::Object(Map::new()));

        let common: BlockCommon = serde_json::from_value(Value::Object(fields))
            .map_err(|e| de::Error::custom(format!("invalid block attributes: {}", e)))?;
        let kind = BlockKind::from_wire(&block_type, payload)
            .map_err(|e| de::Error::custom(format!("invalid {} payload: {}", block_type, e)))?;

        Ok(Block { common, kind })
    }
}
