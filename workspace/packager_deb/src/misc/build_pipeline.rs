use debian::execute::CommandRunner;
use log::info;

use crate::{error::PackagingError, source_package::SourcePackage};

pub trait BuildStep {
    fn name(&self) -> &'static str;

    fn step(
        &self,
        package: &mut SourcePackage,
        runner: &dyn CommandRunner,
    ) -> Result<(), PackagingError>;
}

#[derive(Default)]
pub struct BuildPipeline {
    handlers: Vec<Box<dyn BuildStep>>,
}

impl BuildPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_step<T: BuildStep + 'static>(&mut self, handler: T) -> &mut Self {
        self.handlers.push(Box::new(handler));
        self
    }

    pub fn step_names(&self) -> Vec<&'static str> {
        self.handlers.iter().map(|handler| handler.name()).collect()
    }

    /// Runs the steps in insertion order, stopping at the first error.
    pub fn execute(
        &self,
        package: &mut SourcePackage,
        runner: &dyn CommandRunner,
    ) -> Result<(), PackagingError> {
        for handler in &self.handlers {
            info!("Running step: {}", handler.name());
            handler.step(package, runner)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use debian::testing::RecordingRunner;
    use std::{cell::RefCell, rc::Rc};

    struct Named(&'static str, Rc<RefCell<Vec<&'static str>>>);

    impl BuildStep for Named {
        fn name(&self) -> &'static str {
            self.0
        }

        fn step(
            &self,
            _package: &mut SourcePackage,
            _runner: &dyn CommandRunner,
        ) -> Result<(), PackagingError> {
            self.1.borrow_mut().push(self.0);
            Ok(())
        }
    }

    struct Failing;

    impl BuildStep for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn step(
            &self,
            _package: &mut SourcePackage,
            _runner: &dyn CommandRunner,
        ) -> Result<(), PackagingError> {
            Err(PackagingError::InstallPhaseNotConfigured)
        }
    }

    #[test]
    fn test_steps_run_in_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut pipeline = BuildPipeline::new();
        pipeline
            .add_step(Named("first", seen.clone()))
            .add_step(Named("second", seen.clone()));

        let mut package = SourcePackage::new(".");
        pipeline
            .execute(&mut package, &RecordingRunner::new())
            .unwrap();

        assert_eq!(pipeline.step_names(), ["first", "second"]);
        assert_eq!(*seen.borrow(), ["first", "second"]);
    }

    #[test]
    fn test_pipeline_stops_at_first_error() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut pipeline = BuildPipeline::new();
        pipeline
            .add_step(Named("first", seen.clone()))
            .add_step(Failing)
            .add_step(Named("never", seen.clone()));

        let mut package = SourcePackage::new(".");
        let result = pipeline.execute(&mut package, &RecordingRunner::new());

        assert!(matches!(
            result,
            Err(PackagingError::InstallPhaseNotConfigured)
        ));
        assert_eq!(*seen.borrow(), ["first"]);
    }
}
