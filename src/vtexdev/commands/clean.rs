use crate::commands::PlanContext;
use crate::plan::{Invocation, Plan, PlanBuilder};
use crate::request::ResolvedOptions;

/// Removes the dev container; `--all` also drops the network, dangling
/// volumes and the dev image. Removal of something that is already gone
/// exits 1 and is not treated as a failure.
pub fn plan(options: &ResolvedOptions, ctx: &PlanContext) -> Plan {
    let config = &ctx.config;
    let runtime = config.runtime.as_str();
    let container = config.container_name.as_str();
    let force = options.flag("force");

    let mut steps = PlanBuilder::new();
    if force {
        steps.run(Invocation::new(runtime, ["rm", "--force", container]).tolerate(1));
    } else {
        steps
            .run(Invocation::new(runtime, ["stop", container]).tolerate(1))
            .run(Invocation::new(runtime, ["rm", container]).tolerate(1));
    }

    if options.flag("all") {
        let image = config.image_tag("latest");
        let mut rmi = vec!["image", "rm"];
        if force {
            rmi.push("--force");
        }
        rmi.push(image.as_str());

        steps
            .run(Invocation::new(runtime, ["network", "rm", config.network.as_str()]).tolerate(1))
            .run(Invocation::new(runtime, ["volume", "prune", "--force"]))
            .run(Invocation::new(runtime, rmi).tolerate(1));
    }

    steps.finish(options.command())
}
