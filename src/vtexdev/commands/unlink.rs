use crate::commands::PlanContext;
use crate::plan::{Invocation, Plan, PlanBuilder};
use crate::request::ResolvedOptions;

pub fn plan(options: &ResolvedOptions, ctx: &PlanContext) -> Plan {
    let mut args = vec!["unlink"];
    if options.flag("all") {
        args.push("--all");
    }

    let mut steps = PlanBuilder::new();
    steps.run(Invocation::new(&ctx.config.platform_cli, args));
    steps.finish(options.command())
}
