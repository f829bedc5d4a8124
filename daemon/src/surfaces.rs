//! Chat console and HTTP API in one process.
//!
//! Both surfaces go through the same [`EnrollmentWorkflow`], so they share
//! one cached mapping and one set of account locks.
//!
//! [`EnrollmentWorkflow`]: campaign_enrollment::EnrollmentWorkflow

use crate::console::run_console;
use crate::shutdown::ShutdownController;
use campaign_commands::{Channel, ChatFrontend, ChatPlatform};
use campaign_rpc::RpcServer;
use campaign_types::AccountId;
use tokio::io::AsyncBufRead;
use tracing::info;

/// Serve the HTTP API while the console reads `input`.
///
/// Returns once the input ends, after stopping the server, or once the
/// server stops on its own (for example on a shutdown signal).
pub async fn run_surfaces<R, P>(
    server: RpcServer,
    frontend: &ChatFrontend,
    platform: &P,
    input: R,
    author: AccountId,
    channel: Channel,
    controller: &ShutdownController,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    P: ChatPlatform,
{
    let workflow = frontend.workflow().clone();
    let shutdown = controller.signalled();
    let mut server = tokio::spawn(async move { server.start(workflow, shutdown).await });

    tokio::select! {
        replies = run_console(frontend, platform, input, author, channel) => {
            let replies = replies?;
            info!(replies, "console input closed, stopping HTTP API");
        }
        stopped = &mut server => {
            stopped??;
            info!("HTTP API stopped, closing console");
            return Ok(());
        }
    }

    controller.shutdown();
    server.await??;
    Ok(())
}
