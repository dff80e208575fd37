//! Publishes the app through the platform CLI.
//!
//! `whoami` runs first so an expired login fails before anything is published.
//! Unless `--force` is given a confirmation step sits right before the first
//! publishing call; it is the only difference `--force` makes to the plan.

use crate::commands::PlanContext;
use crate::plan::{Invocation, Plan, PlanBuilder, Step};
use crate::request::ResolvedOptions;

pub fn plan(options: &ResolvedOptions, ctx: &PlanContext) -> Plan {
    let cli = ctx.config.platform_cli.as_str();
    let env = options.text("env").unwrap_or("staging");
    let workspace = options
        .text("workspace")
        .or(ctx.session.workspace.as_deref());

    let mut steps = PlanBuilder::new();
    steps.run(Invocation::new(cli, ["whoami"]).captured());

    if let Some(ws) = workspace {
        steps.run(Invocation::new(cli, ["use", ws]));
    }

    if !options.flag("force") {
        let target = match workspace {
            Some(ws) => format!("{} (workspace {})", env, ws),
            None => env.to_string(),
        };
        steps.push(Step::Confirm {
            prompt: format!("Deploy to {}?", target),
        });
    }

    if env == "production" {
        steps
            .run(Invocation::new(cli, ["publish", "--yes"]))
            .run(Invocation::new(cli, ["deploy", "--yes"]));
    } else {
        steps.run(Invocation::new(cli, ["publish", "--tag", "beta", "--yes"]));
    }

    steps.finish(options.command())
}
