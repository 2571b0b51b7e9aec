use moviedb_http::MovieDbClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let db = MovieDbClient::from_env().map_err(anyhow::Error::msg)?;

    let movie = db.search_movie("Inception").await?;
    println!("best match: {movie:?}");

    println!("popular now:");
    for movie in db.popular_movies().await? {
        println!("  {movie:?}");
    }

    println!("science fiction picks:");
    for movie in db.discover_by_genre("science fiction").await? {
        println!("  {movie:?}");
    }

    Ok(())
}
