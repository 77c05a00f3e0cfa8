use minesweeper_host::{
    CellView, ChannelObserver, GameEvent, GameHandle, GameSession, HostConfig, Pos, Progress,
};
use rand::seq::IndexedRandom;
use tokio::time::{Duration, sleep};

fn render(session: &GameSession) -> String {
    session
        .view()
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| match cell {
                    CellView::Hidden => '#',
                    CellView::Flagged => 'F',
                    CellView::Mine => '*',
                    CellView::Revealed { adjacent: 0 } => '.',
                    CellView::Revealed { adjacent } => char::from(b'0' + adjacent),
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let config = HostConfig::from_env()?;
    let mut rng = config.rng();
    let (observer, mut events) = ChannelObserver::new();
    let game = GameHandle::start(&config, None, Progress::default(), observer)?;

    // Spawn background task to report events
    let event_handler = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            match event {
                GameEvent::Updated { status, score } => {
                    println!("📋 {:?}, score {}", status, score);
                }
                GameEvent::Completed {
                    final_score,
                    completed,
                } => {
                    if completed {
                        println!("🎉 You won with {} points!", final_score);
                    } else {
                        println!("💣 Game over with {} points", final_score);
                    }
                    break;
                }
            }
        }
    });

    let params = config.params;
    game.reveal(Pos::new(params.width / 2, params.height / 2))?;

    // Click random hidden cells until the game ends
    loop {
        sleep(Duration::from_millis(300)).await;
        let session = game.snapshot().await?;
        if session.game_over() {
            println!("{}\n", render(&session));
            break;
        }

        let hidden: Vec<Pos> = (0..params.height)
            .flat_map(|y| (0..params.width).map(move |x| Pos::new(x, y)))
            .filter(|&pos| session.board().view(pos, false) == Some(CellView::Hidden))
            .collect();

        if let Some(&pos) = hidden.choose(&mut rng) {
            println!("{}\n", render(&session));
            game.reveal(pos)?;
        }
    }

    let (session, progress) = game.shutdown().await?;
    event_handler.await?;
    println!(
        "Finished after {}s, best score {:?}",
        session.elapsed_seconds(),
        progress.best_score
    );
    Ok(())
}
