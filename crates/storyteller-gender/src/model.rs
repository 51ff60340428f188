use std::path::Path;

use tract_onnx::prelude::*;
use tracing::{debug, info, warn};

use storyteller_core::{ClassifierError, GenderClassifier};

use crate::encoding::{NameEncoder, pick_label};
use crate::error::ModelError;
use crate::metadata::{InputDtype, ModelMetadata};

type Plan = SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

/// A speaker-name gender classifier backed by an ONNX export of the
/// character-level LSTM, run with tract.
pub struct GenderModel {
    plan: Plan,
    encoder: NameEncoder,
    metadata: ModelMetadata,
}

impl std::fmt::Debug for GenderModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenderModel")
            .field("labels", &self.metadata.labels)
            .field("max_len", &self.metadata.max_len)
            .finish_non_exhaustive()
    }
}

impl GenderModel {
    /// Load the model at `path`, or `Ok(None)` if the file does not exist.
    ///
    /// A present model with a missing or invalid `<path>.json` sidecar, or a
    /// graph tract cannot load, is an error.
    pub fn load(path: &Path) -> Result<Option<Self>, ModelError> {
        if !path.exists() {
            warn!(
                "gender model not found at {}; annotation disabled",
                path.display()
            );
            return Ok(None);
        }
        let model = Self::load_from(path)?;
        info!(
            "gender model loaded from {} (labels: {})",
            path.display(),
            model.metadata.labels.join(", ")
        );
        Ok(Some(model))
    }

    /// Load a model that must exist.
    pub fn load_from(path: &Path) -> Result<Self, ModelError> {
        let metadata = ModelMetadata::load(&ModelMetadata::path_for(path))?;
        debug!(
            "loading ONNX model with tract from {} (max_len {})",
            path.display(),
            metadata.max_len
        );

        let load_err = |e: TractError| ModelError::Load {
            path: path.to_path_buf(),
            reason: e.to_string(),
        };

        let datum_type = match metadata.input_dtype {
            InputDtype::Float32 => f32::datum_type(),
            InputDtype::Int64 => i64::datum_type(),
            InputDtype::Int32 => i32::datum_type(),
        };
        let input_shape = [1, metadata.max_len];

        let mut model = tract_onnx::onnx().model_for_path(path).map_err(load_err)?;
        // Pin the sequence axis so the graph can be typed and optimised.
        model
            .set_input_fact(0, InferenceFact::dt_shape(datum_type, &input_shape[..]))
            .map_err(load_err)?;

        let plan = model
            .into_typed()
            .map_err(load_err)?
            .into_optimized()
            .map_err(load_err)?
            .into_runnable()
            .map_err(load_err)?;

        Ok(Self {
            plan,
            encoder: NameEncoder::new(&metadata),
            metadata,
        })
    }

    fn input_tensor(&self, codes: &[usize]) -> TractResult<Tensor> {
        let shape = [1, self.encoder.max_len()];
        match self.metadata.input_dtype {
            InputDtype::Float32 => {
                let data: Vec<f32> = codes.iter().map(|&c| c as f32).collect();
                Tensor::from_shape(&shape, data.as_slice())
            }
            InputDtype::Int64 => {
                let data: Vec<i64> = codes.iter().map(|&c| c as i64).collect();
                Tensor::from_shape(&shape, data.as_slice())
            }
            InputDtype::Int32 => {
                let data: Vec<i32> = codes.iter().map(|&c| c as i32).collect();
                Tensor::from_shape(&shape, data.as_slice())
            }
        }
    }
}

impl GenderClassifier for GenderModel {
    fn classify(&self, name: &str) -> Result<String, ClassifierError> {
        let codes = self.encoder.encode(name);
        let input = self
            .input_tensor(&codes)
            .map_err(|e| ClassifierError::Encoding {
                name: name.to_string(),
                reason: e.to_string(),
            })?;

        let outputs = self
            .plan
            .run(tvec!(input.into_tvalue()))
            .map_err(|e| ClassifierError::Inference(e.to_string()))?;

        let output = outputs
            .first()
            .ok_or_else(|| ClassifierError::Output("model returned no outputs".into()))?;
        let scores: Vec<f32> = output
            .to_array_view::<f32>()
            .map_err(|e| ClassifierError::Output(e.to_string()))?
            .iter()
            .copied()
            .collect();

        pick_label(&scores, &self.metadata.labels, self.metadata.threshold).map(str::to_string)
    }

    fn labels(&self) -> &[String] {
        &self.metadata.labels
    }
}
