use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use url::Url;

use taskgrid::calendar::CalendarView;
use taskgrid::client::Client;
use taskgrid::controller::feedback::feedback_channel;
use taskgrid::form::AddTaskForm;
use taskgrid::resource::Resource;
use taskgrid::{TaskId, TaskListController};

#[derive(Parser)]
#[command(name = "taskgrid")]
#[command(version)]
#[command(about = "Manage your dated tasks from the command line")]
#[command(after_help = "Depending on your RUST_LOG value, you may see more or less details about the requests.")]
struct Cli {
    /// Base URL of the task server
    #[arg(long, env = taskgrid::config::URL_ENV_VAR)]
    url: Url,

    /// Session cookie to authenticate with (e.g. `authjs.session-token=...`)
    #[arg(long, env = taskgrid::config::SESSION_ENV_VAR)]
    session: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every task
    List,
    /// Add a task
    Add {
        text: String,
        /// Due date, as YYYY-MM-DD
        date: String,
    },
    /// Delete a task
    Delete {
        id: String,
    },
    /// Show the tasks of a week
    Week {
        /// Any day of the week to display, as YYYY-MM-DD (defaults to today)
        date: Option<NaiveDate>,
    },
}


#[tokio::main]
async fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let resource = match Resource::new(cli.url, cli.session) {
        Ok(resource) => resource,
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        },
    };
    let client = Client::from_resource(resource);

    let (sender, receiver) = feedback_channel();
    let mut controller = TaskListController::with_feedback(client, sender);

    let success = match cli.command {
        Command::List => {
            let refreshed = controller.refresh().await;
            taskgrid::utils::print_task_list(&controller);
            refreshed
        },
        Command::Add{ text, date } => {
            let mut form = AddTaskForm::new();
            form.set_text(text);
            form.set_date(date);
            let created = controller.add_task(&mut form).await;
            if let Some(msg) = &form.errors().text { eprintln!("text: {}", msg); }
            if let Some(msg) = &form.errors().date { eprintln!("date: {}", msg); }
            if created {
                taskgrid::utils::print_task_list(&controller);
            }
            created
        },
        Command::Delete{ id } => {
            let deleted = controller.remove_task(&TaskId::from(id)).await;
            if deleted {
                taskgrid::utils::print_task_list(&controller);
            }
            deleted
        },
        Command::Week{ date } => {
            let today = chrono::Local::now().date_naive();
            let mut view = CalendarView::week(date.unwrap_or(today), today);
            let refreshed = controller.refresh().await;
            view.sync(controller.tasks());
            taskgrid::utils::print_calendar(&view);
            refreshed
        },
    };

    log::debug!("Last controller event: {}", *receiver.borrow());
    if let Some(message) = controller.error_message() {
        eprintln!("Error: {}", message);
    }
    if success == false {
        std::process::exit(1);
    }
}
