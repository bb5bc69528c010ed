use crate::commands::ui::Ui;
use crate::core::dispatch::AddPolicyArgs;
use crate::core::resolver::PolicyResolver;
use crate::domain::model::{SourceType, Target};
use crate::domain::ports::{Directory, PolicyClient};
use crate::utils::error::Result;
use std::io::Write;

/// `add-network-policy SOURCE_APP (--destination-app APP | --destination-ips RANGE) ...`
#[derive(Debug, Clone, Default)]
pub struct AddNetworkPolicyCommand {
    pub args: AddPolicyArgs,
}

impl AddNetworkPolicyCommand {
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
        let request = self.args.clone().into_request()?;
        target.check()?;

        let source_kind = request.source_type.unwrap_or(SourceType::App);
        ui.display_text(&format!(
            "Adding network policy to {} {} in org {} / space {} as {}...",
            source_kind, request.source_app, target.org_name, target.space_name, target.user_name
        ))?;

        let (result, warnings) = resolver
            .add_policy(&target.space_guid, &request)
            .await
            .into_parts();
        ui.display_warnings(&warnings)?;
        result?;

        ui.display_ok()
    }
}
