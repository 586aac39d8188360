mod hook_pipeline;
mod overlay;
