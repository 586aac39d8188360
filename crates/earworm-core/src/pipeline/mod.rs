mod collaborator;
mod command;
mod worker;

pub use {collaborator::Pipeline, command::PipelineCommand, worker::PipelineWorker};
