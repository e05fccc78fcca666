use serde::{Deserialize, Serialize};

use crate::error::{SeriesError, SeriesResult};

use super::{ChartView, TreemapView};

pub const CHART_VIEW_JSON_SCHEMA_V1: u32 = 1;
pub const TREEMAP_VIEW_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartViewJsonContractV1 {
    pub schema_version: u32,
    pub view: ChartView,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreemapViewJsonContractV1 {
    pub schema_version: u32,
    pub view: TreemapView,
}

impl ChartView {
    pub fn to_json_contract_v1_pretty(&self) -> SeriesResult<String> {
        let payload = ChartViewJsonContractV1 {
            schema_version: CHART_VIEW_JSON_SCHEMA_V1,
            view: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            SeriesError::Json(format!("failed to serialize chart view contract v1: {e}"))
        })
    }

    /// Accepts either a bare view or a versioned v1 payload.
    pub fn from_json_compat_str(input: &str) -> SeriesResult<Self> {
        if let Ok(view) = serde_json::from_str::<ChartView>(input) {
            return Ok(view);
        }
        let payload: ChartViewJsonContractV1 = serde_json::from_str(input)
            .map_err(|e| SeriesError::Json(format!("failed to parse chart view payload: {e}")))?;
        if payload.schema_version != CHART_VIEW_JSON_SCHEMA_V1 {
            return Err(SeriesError::Json(format!(
                "unsupported chart view schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.view)
    }
}

impl TreemapView {
    pub fn to_json_contract_v1_pretty(&self) -> SeriesResult<String> {
        let payload = TreemapViewJsonContractV1 {
            schema_version: TREEMAP_VIEW_JSON_SCHEMA_V1,
            view: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            SeriesError::Json(format!("failed to serialize treemap view contract v1: {e}"))
        })
    }

    pub fn from_json_compat_str(input: &str) -> SeriesResult<Self> {
        if let Ok(view) = serde_json::from_str::<TreemapView>(input) {
            return Ok(view);
        }
        let payload: TreemapViewJsonContractV1 = serde_json::from_str(input)
            .map_err(|e| SeriesError::Json(format!("failed to parse treemap view payload: {e}")))?;
        if payload.schema_version != TREEMAP_VIEW_JSON_SCHEMA_V1 {
            return Err(SeriesError::Json(format!(
                "unsupported treemap view schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.view)
    }
}
