use crate::commands::PlanContext;
use crate::plan::{Invocation, Plan, PlanBuilder};
use crate::request::ResolvedOptions;

/// Account precedence: `--account`, the session, then `default_account` from
/// config. With none of them the platform CLI prompts on its own.
pub fn plan(options: &ResolvedOptions, ctx: &PlanContext) -> Plan {
    let account = options
        .text("account")
        .or(ctx.session.account.as_deref())
        .or(ctx.config.default_account.as_deref());

    let mut args = vec!["login"];
    args.extend(account);

    let mut steps = PlanBuilder::new();
    steps.run(Invocation::new(&ctx.config.platform_cli, args));
    steps.finish(options.command())
}
