use crate::commands::ui::Ui;
use crate::core::dispatch::ListSelection;
use crate::core::render::policy_table;
use crate::core::resolver::PolicyResolver;
use crate::domain::model::Target;
use crate::domain::ports::{Directory, PolicyClient};
use crate::domain::warnings::Warnings;
use crate::utils::error::Result;
use std::io::Write;

/// `network-policies [--source SOURCE] [--type app|space]`
#[derive(Debug, Clone, Default)]
pub struct NetworkPoliciesCommand {
    pub source: String,
    pub source_type: String,
}

impl NetworkPoliciesCommand {
    pub async fn execute<D, P, O, E>(
        &self,
        resolver: &PolicyResolver<D, P>,
        target: &Target,
        ui: &mut Ui<O, E>,
    ) -> Result<()>
    where
        D: Directory,
        P: PolicyClient,
        O: Write,
        E: Write,
    {
        target.check()?;
        let selection = ListSelection::from_flags(&self.source, &self.source_type)?;

        let mut warnings = Warnings::new();
        let scope = match warnings.absorb(selection.scope(resolver, target).await) {
            Ok(scope) => scope,
            Err(e) => {
                ui.display_warnings(&warnings)?;
                return Err(e);
            }
        };
        ui.display_text(&scope.flavor(target))?;

        let result = warnings.absorb(scope.list(resolver).await);
        ui.display_warnings(&warnings)?;
        let policies = result?;

        ui.display_newline()?;
        ui.display_text(&policy_table(&policies))
    }
}
