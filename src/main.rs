use colored::Colorize;
use rand::{thread_rng, Rng};

use trickster_rs::games::trickster::advisor::{suggestion_request, BidAdvisor, EvenSplitAdvisor};
use trickster_rs::games::trickster::{GameConfig, GamePhase, PlayerSetup, TricksterGame};
use trickster_rs::store::{GameRepository, MemoryGameStore};

/// Play one full game with random bids and tricks, persisting every
/// transition through the in-memory store.
fn main() {
    let game_id = "demo";
    let mut store = MemoryGameStore::new();
    store.subscribe(game_id, |game| {
        println!("{}", format!("  saved snapshot ({:?})", game.phase).dimmed());
    });

    let setups = [
        PlayerSetup::named("You"),
        PlayerSetup::named("West"),
        PlayerSetup::named("North"),
        PlayerSetup::named("East"),
    ];
    let mut game = TricksterGame::new(&setups, 7, GameConfig::default());
    store.save(game_id, &game).expect("save should succeed");

    let advisor = EvenSplitAdvisor {
        player_count: game.players.len(),
    };
    let suggestion = advisor.suggest(&suggestion_request(&game, 0));
    println!(
        "{} {} - {}",
        "Advisor suggests bidding".cyan(),
        suggestion.suggested_bid,
        suggestion.reasoning
    );

    let mut rng = thread_rng();
    while game.phase != GamePhase::GameOver {
        let cards = game.cards_this_round();
        println!(
            "\n{}",
            format!("Round {} ({} cards)", game.current_round, cards).bold()
        );

        // Random bids, re-rolled when they land on the forbidden total
        loop {
            for id in 0..game.players.len() {
                game.update_bid(id, Some(rng.gen_range(0..=cards)));
            }
            if game.validate_bids().is_ok() {
                break;
            }
        }
        game.begin_scoring().expect("bids were validated");
        store.save(game_id, &game).expect("save should succeed");

        // Hand out the tricks one card at a time
        let mut taken = vec![0; game.players.len()];
        for _ in 0..cards {
            taken[rng.gen_range(0..game.players.len())] += 1;
        }
        for (id, tricks) in taken.iter().enumerate() {
            game.update_tricks(id, Some(*tricks));
        }
        game.score_round().expect("tricks account for every card");
        store.save(game_id, &game).expect("save should succeed");

        for player in &game.players {
            let outcome = if player.is_bid_successful == Some(true) {
                "hit".green()
            } else {
                "miss".red()
            };
            println!(
                "  {:<6} bid {} took {} ({}) total {}",
                player.name,
                player.current_bid.expect("bid was entered"),
                player.current_tricks.expect("tricks were entered"),
                outcome,
                player.total_score
            );
        }

        game.advance_round();
        store.save(game_id, &game).expect("save should succeed");
    }

    println!("\n{}", "Final standings".bold());
    for result in game.final_results() {
        let line = format!(
            "  {:<6} {:>4} pts ({}/{} bids hit)",
            result.name, result.total_score, result.total_bids_success, result.total_bids_made
        );
        if result.is_winner {
            println!("{}", line.green().bold());
        } else {
            println!("{}", line);
        }
    }
}
