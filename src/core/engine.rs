use crate::core::Pipeline;
use crate::utils::error::Result;

/// Drives a pipeline through extract, transform and load.
pub struct BatchEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> BatchEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Reading input files...");
        let input = self.pipeline.extract().await?;
        tracing::info!("Loaded {} URLs", input.table.rows.len());

        tracing::info!("Testing URLs against the htaccess configuration...");
        let output = self.pipeline.transform(input).await?;
        tracing::info!(
            "Processed {} rows ({} flagged)",
            output.table.records.len(),
            output.flagged_rows
        );

        tracing::info!("Writing results...");
        let output_path = self.pipeline.load(output).await?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(output_path)
    }
}
