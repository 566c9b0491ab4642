/// Landing page served on `/`.
pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>Rei Notion RSS Feed</title>
    <meta charset="utf-8">
</head>
<body>
    <h1>Rei Notion RSS Feed Generator</h1>
    <p>LifeHacker JapanのRSSフィードからRei Notionの著者の記事だけをフィルタリングして配信します。</p>

    <h2>RSSフィードURL</h2>
    <p><code>/feed/author/rei_notion/index.xml</code></p>

    <h2>著者情報</h2>
    <ul>
        <li>著者名: Rei丨暮らしとNotion。</li>
        <li>公式サイト: <a href="https://kurashi-notion.com/">https://kurashi-notion.com/</a></li>
        <li>YouTube: <a href="https://www.youtube.com/@rei_notion">https://www.youtube.com/@rei_notion</a></li>
        <li>X: <a href="https://x.com/rei_notion">https://x.com/rei_notion</a></li>
        <li>Instagram: <a href="http://instagram.com/rei_notion">http://instagram.com/rei_notion</a></li>
    </ul>

    <h2>使い方</h2>
    <p>RSSリーダーに以下のURLを登録してください:</p>
    <pre>/feed/author/rei_notion/index.xml</pre>
</body>
</html>
"#;
