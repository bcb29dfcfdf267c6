// greencore is a pipeline worker for copy/delete/share operations over a
// project's hierarchical object store.
// Copyright (C) 2026  greencore contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use apache_avro::types::Record;
use apache_avro::{Schema, Writer};
use rdkafka::ClientConfig;
use rdkafka::producer::{FutureProducer, FutureRecord};
use tracing::{error, info};

use crate::models::activity::{ActivityChange, ActivityEvent};
use crate::models::node::Node;

const TOPIC: &str = "metadata.items.activity";

/// Schema for rows on the `metadata.items.activity` stream. Kept inline
/// rather than loaded from a file: the upstream metadata service owns the
/// canonical `.avsc`, this is just the shape the engine writes against.
const ACTIVITY_SCHEMA: &str = r#"
{
  "type": "record",
  "name": "ItemActivity",
  "fields": [
    {"name": "activity_type", "type": "string"},
    {"name": "activity_time", "type": "string"},
    {"name": "item_id", "type": "string"},
    {"name": "item_type", "type": "string"},
    {"name": "item_name", "type": "string"},
    {"name": "item_parent_path", "type": "string"},
    {"name": "container_code", "type": "string"},
    {"name": "container_type", "type": "string"},
    {"name": "zone", "type": "int"},
    {"name": "user", "type": "string"},
    {"name": "imported_from", "type": "string"},
    {"name": "changes", "type": {"type": "array", "items": {
      "type": "record",
      "name": "ItemActivityChange",
      "fields": [
        {"name": "item_property", "type": "string"},
        {"name": "old_value", "type": "string"},
        {"name": "new_value", "type": "string"}
      ]
    }}}
  ]
}
"#;

/// Producer for the item-activity stream, one schemaless Avro row per file
/// operation. Mirrors `kafka_producer.py`'s `KafkaProducer`.
pub struct ActivityProducer {
    producer: FutureProducer,
    schema: Schema,
}

impl ActivityProducer {
    pub fn new(bootstrap_servers: &str) -> Result<Self> {
        info!("initializing the kafka producer");
        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", bootstrap_servers)
            .set("enable.idempotence", "true")
            .create()
            .context("failed to start kafka producer")?;

        let schema = Schema::parse_str(ACTIVITY_SCHEMA).context("parsing activity schema")?;

        Ok(ActivityProducer { producer, schema })
    }

    pub async fn log_copy(&self, source: &Node, destination: &Node, operator: &str) -> Result<()> {
        let event = ActivityEvent::for_copy(source, destination, operator, now_rfc3339());
        self.send(event).await
    }

    pub async fn log_delete(&self, node: &Node, operator: &str) -> Result<()> {
        let event = ActivityEvent::for_delete(node, operator, now_rfc3339());
        self.send(event).await
    }

    async fn send(&self, event: ActivityEvent) -> Result<()> {
        let payload = self.encode(&event)?;

        let record = FutureRecord::to(TOPIC).payload(&payload).key(&event.item_id);
        let result = self.producer.send(record, Duration::from_secs(10)).await;

        if let Err((err, _)) = result {
            error!(%err, "failed to send activity message");
            bail!("error sending message to kafka producer: {err}");
        }
        Ok(())
    }

    fn encode(&self, event: &ActivityEvent) -> Result<Vec<u8>> {
        let mut record = Record::new(self.schema.root()).context("building avro record")?;
        record.put("activity_type", event.activity_type.as_str());
        record.put("activity_time", event.activity_time.as_str());
        record.put("item_id", event.item_id.as_str());
        record.put("item_type", event.item_type.as_str());
        record.put("item_name", event.item_name.as_str());
        record.put("item_parent_path", event.item_parent_path.as_str());
        record.put("container_code", event.container_code.as_str());
        record.put("container_type", event.container_type.as_str());
        record.put("zone", event.zone);
        record.put("user", event.user.as_str());
        record.put("imported_from", event.imported_from.as_str());
        record.put("changes", encode_changes(&event.changes));

        let mut writer = Writer::new(&self.schema, Vec::new());
        writer.append(record).context("appending avro record")?;
        writer.into_inner().context("flushing avro writer")
    }
}

fn encode_changes(changes: &[ActivityChange]) -> apache_avro::types::Value {
    use apache_avro::types::Value;
    Value::Array(
        changes
            .iter()
            .map(|change| {
                Value::Record(vec![
                    ("item_property".to_string(), Value::String(change.item_property.clone())),
                    ("old_value".to_string(), Value::String(change.old_value.clone())),
                    ("new_value".to_string(), Value::String(change.new_value.clone())),
                ])
            })
            .collect(),
    )
}

fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339()
}
