use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::info;

use hireflow::board::{
    DropTarget, EvaluationFilter, LocalBoard, NewApplicant, RegistrationType, SortField,
    StageId, STAGE_COLORS,
};
use hireflow::config::AppConfig;
use hireflow::error::AppError;
use hireflow::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "hireflow",
    about = "Walk the recruiting-pipeline board core from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a scripted board scenario on the sample data (default command)
    Demo,
    /// Print the default stage columns
    Stages,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(config.environment, &config.telemetry)?;

    let cli = Cli::parse();
    match cli.command.unwrap_or(Command::Demo) {
        Command::Demo => run_demo(&config).await,
        Command::Stages => print_stages(),
    }
    Ok(())
}

fn print_stages() {
    let board = LocalBoard::sample();
    for stage in board.stages() {
        println!(
            "{}",
            json!({
                "id": stage.id.as_str(),
                "title": stage.title,
                "color": stage.color,
                "fixed": stage.is_fixed,
                "applicants": board.applicants_in(&stage.id).len(),
            })
        );
    }
}

async fn run_demo(config: &AppConfig) {
    if config.persistence.is_configured() {
        info!("remote persistence configured; demo still runs detached");
    }

    let mut board = LocalBoard::sample();
    info!(
        applicants = board.applicants().len(),
        stages = board.stages().len(),
        "board seeded"
    );

    // Single drag: first screen-call candidate into the coding test column.
    let screen_call = StageId::from("screen_call");
    let coding_test = StageId::from("coding_test");
    if let Some(dragged) = board.applicants_in(&screen_call).first().map(|a| a.id.clone()) {
        board.drag_start(&dragged);
        board.drag_over(&dragged, &DropTarget::Column(coding_test.clone()));
        board.drag_end(&dragged, Some(DropTarget::Column(coding_test.clone()))).await;
        info!(applicant = %dragged, "moved to coding test");
    }

    // Multi-select drag: two application-stage candidates at once.
    board.toggle_multi_select();
    let picks: Vec<_> = board
        .applicants_in(&StageId::from("application"))
        .iter()
        .take(2)
        .map(|a| a.id.clone())
        .collect();
    for id in &picks {
        board.toggle_selected(id);
    }
    if let Some(dragged) = picks.first() {
        board.drag_start(dragged);
        board.drag_end(dragged, Some(DropTarget::Column(screen_call.clone()))).await;
        info!(moved = picks.len(), "multi-select move into recruiter screen");
    }
    board.toggle_multi_select();

    // Reorder within the screen-call column.
    let slice: Vec<_> = board
        .applicants_in(&screen_call)
        .iter()
        .map(|a| a.id.clone())
        .collect();
    if slice.len() >= 2 {
        let (active, over) = (slice[slice.len() - 1].clone(), slice[0].clone());
        board.drag_start(&active);
        board.drag_end(&active, Some(DropTarget::Card(over))).await;
        info!(applicant = %active, "reordered to top of recruiter screen");
    }

    // Add a candidate, then a projection pass.
    let added = board
        .add_applicant(NewApplicant {
            name: "Casey Morgan".to_string(),
            registration_type: RegistrationType::Direct,
            stage: StageId::from("application"),
        })
        .await;
    info!(
        applicant = %added,
        registration = RegistrationType::Direct.label(),
        "added applicant"
    );

    // Add a custom column, cycling through the palette.
    let color = STAGE_COLORS[board.stages().len() % STAGE_COLORS.len()];
    let reference_check = board.add_column("Reference Check", color).await;
    info!(column = %reference_check, color, "added column");

    let mut filter = hireflow::board::BoardFilter::default();
    filter.set_evaluation(EvaluationFilter::Completed);
    let highlighted = filter.highlighted_ids(board.applicants());

    let mut sort = hireflow::board::BoardSort::default();
    sort.activate(SortField::Name);
    let display = sort.sorted(&board.applicants()[..5.min(board.applicants().len())]);

    println!(
        "{}",
        json!({
            "columns": board
                .stages()
                .iter()
                .map(|s| json!({
                    "title": s.title,
                    "count": board.applicants_in(&s.id).len(),
                }))
                .collect::<Vec<_>>(),
            "highlighted_completed": highlighted.len(),
            "sorted_by": sort.field().label(),
            "first_by_name": display.first().map(|a| a.name.clone()),
        })
    );

    // Column rules: the fixed column refuses deletion.
    let refusal = board.delete_column(&StageId::from(hireflow::board::HIRED_STAGE)).await;
    info!(refused = refusal.is_err(), "fixed column deletion refused");
}
