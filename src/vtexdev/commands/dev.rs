use crate::commands::{ensure_network, PlanContext};
use crate::plan::{Invocation, Plan, PlanBuilder, Step};
use crate::request::{ResolvedOptions, DEFAULT_PORT};

/// network → run container → wait for health → (attached only) follow logs.
///
/// The container is always started with `--detach`; "detached" mode simply
/// stops after the health check instead of following the log stream.
pub fn plan(options: &ResolvedOptions, ctx: &PlanContext) -> Plan {
    let config = &ctx.config;
    let port = options.port("port").unwrap_or(DEFAULT_PORT);
    let publish = format!("{port}:{port}");
    let port_env = format!("PORT={port}");
    let volume = format!("{}:/app", ctx.project_dir_arg());
    let image = config.image_tag("latest");

    let mut steps = PlanBuilder::new();
    steps
        .run(ensure_network(ctx))
        .run(
            Invocation::new(
                &config.runtime,
                [
                    "run",
                    "--detach",
                    "--rm",
                    "--name",
                    config.container_name.as_str(),
                    "--network",
                    config.network.as_str(),
                    "--publish",
                    publish.as_str(),
                    "--env",
                    port_env.as_str(),
                    "--volume",
                    volume.as_str(),
                    image.as_str(),
                ],
            )
            .captured(),
        )
        .push(Step::WaitHealthy {
            program: config.runtime.clone(),
            container: config.container_name.clone(),
            probes: config.health_probes,
            interval: ctx.health_interval(),
        });

    if !options.flag("detached") {
        steps.push(Step::StreamLogs {
            program: config.runtime.clone(),
            container: config.container_name.clone(),
        });
    }

    steps.finish(options.command())
}
