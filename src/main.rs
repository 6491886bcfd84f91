use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lollypop::{
    Config, Database, DurationStyle, Library, Player, expand_tilde, get_readable_duration,
    domain::{ShuffleMode, TrackId, TrackInfo},
    logging::init_logging,
    truncate_at_last_space,
    web::{
        MatchCandidate, best_match, default_cache_dir, genius_lyrics_uri, lyrics_terms, score,
        search_query, web_cache_path, wikia_lyrics_uri,
    },
};
use std::{path::PathBuf, sync::Arc};
use tracing::info;

const NAME_WIDTH: usize = 40;

#[derive(Parser, Debug)]
#[command(name = "lollypop")]
#[command(about = "Collection, queue and web matching tools for Lollypop")]
#[command(version)]
struct Args {
    /// Config file, defaults to the platform config directory
    #[arg(short, long, env = "LOLLYPOP_CONFIG")]
    config: Option<PathBuf>,

    /// Database file, overrides the config
    #[arg(short, long, env = "LOLLYPOP_DATABASE")]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List albums with their discs and durations
    Albums,

    /// Show or drive the saved user playlist
    Queue {
        /// Replace the playlist with these track ids
        #[arg(long, num_args = 1.., value_delimiter = ',')]
        set: Vec<TrackId>,

        /// Track to start from, the first one by default
        #[arg(long)]
        start: Option<TrackId>,

        /// Append a track
        #[arg(long)]
        add: Option<TrackId>,

        #[arg(long)]
        shuffle: Option<ShuffleMode>,

        #[arg(long, conflicts_with = "prev")]
        next: bool,

        #[arg(long)]
        prev: bool,

        #[arg(long, conflicts_with_all = ["set", "add"])]
        clear: bool,
    },

    /// Score search result titles against track metadata
    Score {
        title: String,

        #[arg(long, default_value = "")]
        artist: String,

        #[arg(long, default_value = "")]
        album: String,

        /// Result titles to score
        #[arg(required = true)]
        candidates: Vec<String>,
    },

    /// Show web lookup details for a track
    Web {
        track: TrackId,

        /// Treat the title as a radio stream title
        #[arg(long)]
        radio: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::load(args.config.as_deref())?;
    init_logging(&config.log_filter)?;

    let db_path = args.database.or_else(|| config.database.clone());

    match args.command {
        Command::Albums => run_albums(&mut open_database(db_path)?),
        Command::Queue {
            set,
            start,
            add,
            shuffle,
            next,
            prev,
            clear,
        } => {
            let ops = QueueOps {
                set,
                start,
                add,
                shuffle,
                next,
                prev,
                clear,
            };
            run_queue(&mut open_database(db_path)?, &config, ops)
        }
        Command::Score {
            title,
            artist,
            album,
            candidates,
        } => {
            run_score(&title, &artist, &album, candidates);
            Ok(())
        }
        Command::Web { track, radio } => {
            run_web(&mut open_database(db_path)?, &config, track, radio)
        }
    }
}

fn open_database(path: Option<PathBuf>) -> Result<Database> {
    match path {
        Some(path) => {
            let path = expand_tilde(path)?;
            Database::open(&path).with_context(|| format!("Failed to open {}", path.display()))
        }
        None => Database::open_default(),
    }
}

fn run_albums(db: &mut Database) -> Result<()> {
    let library = Library::load(db)?;

    for album in library.get_all_albums() {
        let duration = album.duration(db)?;
        println!(
            "{:>5}  {:<width$}  {:<24}  {:>3} tracks  {}",
            album.id,
            truncate_at_last_space(&album.name, NAME_WIDTH),
            truncate_at_last_space(&album.artists.join(", "), 24),
            album.tracks_count(),
            get_readable_duration(duration, DurationStyle::Clean),
            width = NAME_WIDTH,
        );

        if album.discs().len() > 1 {
            for disc in album.discs() {
                println!(
                    "       disc {} {}  ({} tracks, {})",
                    disc.number,
                    disc.name,
                    disc.tracks().len(),
                    get_readable_duration(disc.duration(), DurationStyle::Compact),
                );
            }
        }
    }

    Ok(())
}

struct QueueOps {
    set: Vec<TrackId>,
    start: Option<TrackId>,
    add: Option<TrackId>,
    shuffle: Option<ShuffleMode>,
    next: bool,
    prev: bool,
    clear: bool,
}

fn run_queue(db: &mut Database, config: &Config, ops: QueueOps) -> Result<()> {
    let library = Arc::new(Library::load(db)?);
    let mut player = Player::new(library, config.shuffle);

    if let Some(snapshot) = db.load_playback_snapshot()? {
        player.restore(snapshot);
    }

    if ops.clear {
        player.clear_user_playlist();
    }

    if !ops.set.is_empty() {
        let start = ops.start.unwrap_or(ops.set[0]);
        player.set_user_playlist(ops.set, start)?;
    }

    if let Some(id) = ops.add {
        player.add_to_user_playlist(id)?;
    }

    if let Some(mode) = ops.shuffle {
        if player.set_shuffle_mode(mode) {
            info!(%mode, "Queue reordered");
        }
    }

    if ops.next {
        player.next();
    } else if ops.prev {
        player.prev();
    }

    db.save_playback_snapshot(&player.snapshot())?;

    let current = player.playlist().queue().position();
    println!("shuffle: {}", player.playlist().shuffle_mode());
    for (idx, track) in player.get_queue().iter().enumerate() {
        let marker = if Some(idx) == current { ">" } else { " " };
        println!(
            "{marker} {:>5}  {:<width$}  {}",
            track.id,
            truncate_at_last_space(track.get_title(), NAME_WIDTH),
            track.get_duration_str(),
            width = NAME_WIDTH,
        );
    }

    Ok(())
}

fn run_score(title: &str, artist: &str, album: &str, titles: Vec<String>) {
    let candidates = titles
        .into_iter()
        .enumerate()
        .map(|(idx, t)| MatchCandidate::new(idx.to_string(), t))
        .collect::<Vec<_>>();

    for candidate in &candidates {
        println!(
            "{:>8}  {}",
            score(&candidate.title, title, artist, album),
            candidate.title
        );
    }

    match best_match(&candidates, title, artist, album) {
        Some((best, s)) => println!("best: {} ({s})", best.title),
        None => println!("best: no valid match"),
    }
}

fn run_web(db: &mut Database, config: &Config, id: TrackId, radio: bool) -> Result<()> {
    let library = Library::load(db)?;
    let track = library
        .get_track_by_id(id)
        .ok_or(lollypop::PlayerError::TrackNotFound(id))?;

    let cache_root = match &config.web.cache_dir {
        Some(dir) => expand_tilde(dir)?,
        None => default_cache_dir()?,
    };

    println!("query:  {}", search_query(track));
    println!("cache:  {}", web_cache_path(&cache_root, track).display());
    if !track.uri.is_empty() {
        println!("uri:    {}", track.uri);
    }

    match lyrics_terms(track, radio) {
        Some((artist, title)) => {
            println!("genius: {}", genius_lyrics_uri(artist, title));
            println!("wikia:  {}", wikia_lyrics_uri(artist, title));
        }
        None => println!("lyrics: title is not of the form \"Artist - Title\""),
    }

    Ok(())
}
