use std::collections::HashMap;
use std::path::Path;

use anyhow::{anyhow, Result};
use candle_core::{Device, IndexOp, Tensor};
use candle_nn::{linear, Linear, Module, VarBuilder};
use candle_transformers::models::bert::{BertModel, Config as BertConfig, DTYPE};
use tokenizers::{EncodeInput, InputSequence, Tokenizer};

use nutrirag_core::traits::CrossEncoder;
use nutrirag_embed::device::select_device;

const MAX_LEN: usize = 512;

/// BERT sequence-classification cross-encoder (ms-marco MiniLM class).
/// Each (query, passage) pair is encoded jointly as segment A / segment B
/// and reduced to a single relevance logit.
pub struct CrossEncoderModel {
    model: BertModel,
    pooler: Linear,
    classifier: Linear,
    tokenizer: Tokenizer,
    device: Device,
}

impl CrossEncoderModel {
    pub fn new(model_dir: &Path) -> Result<Self> {
        let device = select_device();
        let tokenizer_path = model_dir.join("tokenizer.json");
        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| anyhow!("failed to load tokenizer from {}: {e}", tokenizer_path.display()))?;
        let config: BertConfig =
            serde_json::from_str(&std::fs::read_to_string(model_dir.join("config.json"))?)?;
        let weights = candle_core::pickle::read_all(model_dir.join("pytorch_model.bin"))?;
        let weights: HashMap<String, Tensor> = weights.into_iter().collect();
        let vb = VarBuilder::from_tensors(weights, DTYPE, &device);
        // Sequence-classification checkpoints prefix the encoder with "bert".
        let model = BertModel::load(vb.pp("bert"), &config)?;
        let pooler = linear(
            config.hidden_size,
            config.hidden_size,
            vb.pp("bert").pp("pooler").pp("dense"),
        )?;
        let classifier = linear(config.hidden_size, 1, vb.pp("classifier"))?;
        tracing::info!(dir = %model_dir.display(), "cross-encoder loaded");
        Ok(Self { model, pooler, classifier, tokenizer, device })
    }

    fn encode_pairs(&self, query: &str, texts: &[&str]) -> Result<(Tensor, Tensor, Tensor)> {
        let mut encodings = Vec::with_capacity(texts.len());
        let mut max_len = 0usize;
        for text in texts {
            let input = EncodeInput::Dual(InputSequence::from(query), InputSequence::from(*text));
            let enc = self
                .tokenizer
                .encode(input, true)
                .map_err(|e| anyhow!("tokenization failed: {e}"))?;
            max_len = max_len.max(enc.get_ids().len().min(MAX_LEN));
            encodings.push(enc);
        }

        let batch = encodings.len();
        let mut ids = Vec::with_capacity(batch * max_len);
        let mut type_ids = Vec::with_capacity(batch * max_len);
        let mut mask = Vec::with_capacity(batch * max_len);
        for enc in &encodings {
            let take = enc.get_ids().len().min(max_len);
            ids.extend_from_slice(&enc.get_ids()[..take]);
            type_ids.extend_from_slice(&enc.get_type_ids()[..take]);
            mask.extend_from_slice(&enc.get_attention_mask()[..take]);
            for _ in take..max_len {
                ids.push(0);
                type_ids.push(0);
                mask.push(0);
            }
        }
        let input_ids = Tensor::from_vec(ids, (batch, max_len), &self.device)?;
        let token_type_ids = Tensor::from_vec(type_ids, (batch, max_len), &self.device)?;
        let attention_mask = Tensor::from_vec(mask, (batch, max_len), &self.device)?;
        Ok((input_ids, token_type_ids, attention_mask))
    }
}

impl CrossEncoder for CrossEncoderModel {
    fn score_batch(&self, query: &str, texts: &[&str]) -> Result<Vec<f32>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let (input_ids, token_type_ids, attention_mask) = self.encode_pairs(query, texts)?;
        let hidden = self
            .model
            .forward(&input_ids, &token_type_ids, Some(&attention_mask))?;
        let cls = hidden.i((.., 0))?;
        let pooled = self.pooler.forward(&cls)?.tanh()?;
        let logits = self.classifier.forward(&pooled)?.squeeze(1)?;
        let scores = logits.to_device(&Device::Cpu)?.to_vec1::<f32>()?;
        Ok(scores)
    }
}
