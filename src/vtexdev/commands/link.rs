use crate::commands::PlanContext;
use crate::plan::{Invocation, Plan, PlanBuilder};
use crate::request::ResolvedOptions;

pub fn plan(options: &ResolvedOptions, ctx: &PlanContext) -> Plan {
    let cli = ctx.config.platform_cli.as_str();
    let workspace = options
        .text("workspace")
        .or(ctx.session.workspace.as_deref());

    let mut steps = PlanBuilder::new();
    if let Some(ws) = workspace {
        steps.run(Invocation::new(cli, ["use", ws]));
    }
    steps.run(Invocation::new(cli, ["link"]));
    steps.finish(options.command())
}

#[cfg(test)]
mod tests {
    use crate::commands::test_support::*;
    use crate::request::{CommandKind, CommandRequest};

    #[test]
    fn links_current_workspace_by_default() {
        let plan = plan_for(CommandRequest::new(CommandKind::Link), &context());
        assert_eq!(described(&plan), vec!["vtex link"]);
    }

    #[test]
    fn switches_workspace_first() {
        let plan = plan_for(
            CommandRequest::new(CommandKind::Link).with("workspace", "dev-ana"),
            &context(),
        );
        assert_eq!(described(&plan), vec!["vtex use dev-ana", "vtex link"]);
    }
}
