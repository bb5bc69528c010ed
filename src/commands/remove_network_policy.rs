use crate::commands::ui::Ui;
use crate::core::dispatch::RemovePolicyArgs;
use crate::core::resolver::{PolicyResolver, RemovePolicyRequest};
use crate::domain::model::Target;
use crate::domain::ports::{Directory, PolicyClient};
use crate::utils::error::Result;
use std::io::Write;

/// `remove-network-policy SOURCE_APP --destination-app APP --protocol P --port PORTS`
#[derive(Debug, Clone)]
pub struct RemoveNetworkPolicyCommand {
    pub args: RemovePolicyArgs,
}

impl RemoveNetworkPolicyCommand {
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
        let request = RemovePolicyRequest::from(self.args.clone());

        ui.display_text(&format!(
            "Removing network policy for app {} in org {} / space {} as {}...",
            request.source_app, target.org_name, target.space_name, target.user_name
        ))?;

        let (result, warnings) = resolver
            .remove_policy(&target.space_guid, &request)
            .await
            .into_parts();
        ui.display_warnings(&warnings)?;
        result?;

        ui.display_ok()
    }
}
