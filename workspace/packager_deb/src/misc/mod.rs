pub mod build_pipeline;
