use serde::Deserialize;

use crate::{EventId, EventRecord};

#[derive(Deserialize)]
struct Body {
    data: Vec<Row>,
}

// Column names as the sheet API spells them.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Row {
    #[serde(rename = "iD")]
    id: Scalar,
    event: String,
    category: String,
    start_date: String,
    start_time: String,
    end_time: String,
    #[serde(rename = "avaiability")]
    availability: Count,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Number(serde_json::Number),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Count {
    Number(u32),
    Text(String),
}

impl Count {
    fn into_u32(self) -> Result<u32, serde_json::Error> {
        match self {
            Count::Number(n) => Ok(n),
            Count::Text(s) => s.trim().parse().map_err(|_| {
                serde::de::Error::custom(format!("invalid availability `{s}`"))
            }),
        }
    }
}

impl TryFrom<Row> for EventRecord {
    type Error = serde_json::Error;

    fn try_from(row: Row) -> Result<Self, Self::Error> {
        let id = match row.id {
            Scalar::Text(s) => s,
            Scalar::Number(n) => n.to_string(),
        };

        Ok(EventRecord {
            id: EventId(id),
            name: row.event,
            category: row.category,
            start_date: row.start_date,
            start_time: row.start_time,
            end_time: row.end_time,
            availability: row.availability.into_u32()?,
        })
    }
}

/// Parses a response body of the events API into records, in sheet order.
///
/// The body must be an object with a `data` array; a single malformed row
/// rejects the whole body.
pub fn parse_events<S: AsRef<[u8]>>(body: S) -> Result<Vec<EventRecord>, serde_json::Error> {
    let body: Body = serde_json::from_slice(body.as_ref())?;
    body.data.into_iter().map(EventRecord::try_from).collect()
}
