use anyhow::Result;
use candle_core::Tensor;

/// Mean-pool the token axis under the attention mask, then L2-normalize.
/// `hidden` is `[B, T, H]`, `mask` is `[B, T]` with 1 for real tokens.
pub fn masked_mean_l2(hidden: &Tensor, mask: &Tensor) -> Result<Tensor> {
    let (_batch, _time, _hidden_dim) = hidden.dims3()?;
    let mask = mask.to_device(hidden.device())?.to_dtype(hidden.dtype())?;
    let expanded = mask.unsqueeze(2)?.broadcast_as(hidden.shape())?;
    let summed = (hidden * &expanded)?.sum(1)?;
    let counts = mask.sum_keepdim(1)?.clamp(1e-9, f64::INFINITY)?;
    let mean = summed.broadcast_div(&counts)?;
    let norm = mean.sqr()?.sum_keepdim(1)?.sqrt()?.clamp(1e-12, f64::INFINITY)?;
    Ok(mean.broadcast_div(&norm)?)
}
