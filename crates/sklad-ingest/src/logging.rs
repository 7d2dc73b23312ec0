// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStage {
    Prepare,
    Decode,
    Validate,
    Normalize,
    Persist,
    Finalize,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SyncEvent {
    pub stage: SyncStage,
    pub name: String,
    pub fields: BTreeMap<String, String>,
}

#[derive(Debug, Default, Clone)]
pub struct SyncLog {
    events: Vec<SyncEvent>,
}

impl SyncLog {
    pub fn emit(
        &mut self,
        stage: SyncStage,
        name: impl Into<String>,
        fields: BTreeMap<String, String>,
    ) {
        let name = name.into();
        tracing::debug!(?stage, name = %name, "sync stage event");
        self.events.push(SyncEvent {
            stage,
            name,
            fields,
        });
    }

    #[must_use]
    pub fn events(&self) -> &[SyncEvent] {
        &self.events
    }

    #[must_use]
    pub fn into_events(self) -> Vec<SyncEvent> {
        self.events
    }
}
