use crate::commands::PlanContext;
use crate::plan::{Invocation, Plan, PlanBuilder};
use crate::request::ResolvedOptions;

const STATUS_FORMAT: &str = "table {{.Names}}\t{{.Status}}\t{{.Ports}}";

/// A single captured `ps` call; its stdout is reported verbatim.
pub fn plan(options: &ResolvedOptions, ctx: &PlanContext) -> Plan {
    let filter = format!("name={}", ctx.config.container_name);

    let mut steps = PlanBuilder::new();
    steps.run(
        Invocation::new(
            &ctx.config.runtime,
            ["ps", "--all", "--filter", filter.as_str(), "--format", STATUS_FORMAT],
        )
        .captured(),
    );
    steps.finish(options.command())
}
