use tract_onnx::prelude::*;

/// Read-only handle to the frozen regression model. Handlers take this as a
/// trait object so tests can substitute a fake for the ONNX runtime.
pub trait StockModel: Send + Sync {
    /// Number of input columns the model was trained on.
    fn input_width(&self) -> usize;

    /// Predict a single scalar stock value from one feature row.
    fn predict(&self, features: &[f32]) -> anyhow::Result<f32>;
}

pub struct OnnxStockModel {
    plan: SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>,
    input_width: usize,
}

impl OnnxStockModel {
    pub fn load<P: AsRef<std::path::Path>>(model_path: P, input_width: usize) -> TractResult<Self> {
        let plan = tract_onnx::onnx()
            .model_for_path(model_path)?
            .with_input_fact(
                0,
                InferenceFact::dt_shape(f32::datum_type(), tvec!(1, input_width)),
            )?
            .into_optimized()?
            .into_runnable()?;

        Ok(Self { plan, input_width })
    }
}

impl StockModel for OnnxStockModel {
    fn input_width(&self) -> usize {
        self.input_width
    }

    fn predict(&self, features: &[f32]) -> anyhow::Result<f32> {
        let input = Tensor::from_shape(&[1, self.input_width], features)?;
        let outputs = self.plan.run(tvec!(input.into()))?;

        let value = *outputs[0]
            .to_array_view::<f32>()?
            .iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("model produced no output"))?;

        Ok(value)
    }
}
