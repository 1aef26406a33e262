/// Embedded styles and scripts for dashboard pages

pub const STYLE: &str = r#"<style>
        * {
            box-sizing: border-box;
        }

        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Oxygen, Ubuntu, sans-serif;
            margin: 0;
            padding: 20px;
            background: #f7f7f9;
            color: #222;
        }

        body.dark-theme {
            background: #1a1a2e;
            color: #eee;
        }

        h1 {
            font-size: 1.4em;
            margin: 0 0 15px;
        }

        body.dark-theme h1 {
            color: #00d9ff;
        }

        table {
            border-collapse: collapse;
            width: 100%;
        }

        th, td {
            padding: 6px 8px;
            border: 1px solid #ddd;
        }

        body.dark-theme th, body.dark-theme td {
            border-color: #333;
        }

        .text-center {
            text-align: center;
        }

        .badge {
            display: inline-block;
            min-width: 22px;
            padding: 2px 7px;
            margin: 0 1px;
            border-radius: 10px;
            font-size: 0.85em;
        }

        .alert {
            padding: 12px 15px;
            margin-bottom: 15px;
            border-radius: 4px;
        }

        .alert-success { background: #dff0d8; color: #3c763d; }
        .alert-warning { background: #fcf8e3; color: #8a6d3b; }
        .alert-info { background: #d9edf7; color: #31708f; }
        .alert-danger { background: #f2dede; color: #a94442; }

        .btn-toolbar {
            display: flex;
            gap: 10px;
            margin-bottom: 12px;
        }

        .dropdown-menu {
            list-style: none;
            display: inline-flex;
            gap: 8px;
            margin: 0;
            padding: 0 8px;
        }

        .pull-right {
            margin-left: auto;
        }

        /* Charts */
        .chart .bar { fill: steelblue; cursor: pointer; }
        .chart .bar:hover { fill: brown; }
        .chart .axis, .chart .tick { stroke: #000; shape-rendering: crispEdges; }
        body.dark-theme .chart .axis, body.dark-theme .chart .tick { stroke: #aaa; }
        .chart text { font-size: 10px; }
        body.dark-theme .chart text { fill: #eee; }
        .chart .dend-link { fill: none; stroke: #ccc; stroke-width: 1.5px; }
        .chart .dend-node { fill: #fff; stroke: steelblue; stroke-width: 1.5px; }
        .chart .dend-node:hover { fill: silver; }
        .chart .node:hover { fill: gold !important; }
        .chart .bubble-label { fill: #000; pointer-events: none; }

        #messageToolTipDiv {
            position: absolute;
            display: none;
            z-index: 10000;
            border: 2px solid black;
            background-color: rgba(0, 0, 0, 0.8);
            padding: 3px 5px;
            color: white;
            font-size: 12px;
            font-family: arial;
            border-radius: 5px;
            text-align: center;
            min-width: 50px;
            overflow: auto;
        }
    </style>"#;

/// Tooltip panel (created on first hover, then reused) and chart click
/// navigation.
pub const CHART_SCRIPT: &str = r#"<script>
        let tooltipPanel = null;

        function showToolTip(html, x, y) {
            if (tooltipPanel === null) {
                tooltipPanel = document.createElement('div');
                tooltipPanel.id = 'messageToolTipDiv';
                document.body.appendChild(tooltipPanel);
            }
            tooltipPanel.innerHTML = html;
            tooltipPanel.style.left = x + 'px';
            tooltipPanel.style.top = y + 'px';
            tooltipPanel.style.display = 'block';
        }

        function hideToolTip() {
            if (tooltipPanel !== null) {
                tooltipPanel.style.display = 'none';
            }
        }

        document.addEventListener('mouseover', (e) => {
            const el = e.target.closest('[data-tooltip]');
            if (el) {
                showToolTip(el.dataset.tooltip, e.pageX + 10, e.pageY + 10);
            }
        });

        document.addEventListener('mouseout', (e) => {
            if (e.target.closest('[data-tooltip]')) {
                hideToolTip();
            }
        });

        document.addEventListener('mousedown', (e) => {
            const el = e.target.closest('[data-link]');
            if (el) {
                hideToolTip();
                window.location.href = el.dataset.link;
            }
        });
    </script>"#;

/// Scan list interactions. Selection state lives on the server; every
/// checkbox click posts there and the response re-syncs the boxes.
pub const SCAN_LIST_SCRIPT: &str = r#"<script>
        async function post(url, body) {
            const response = await fetch(url, {
                method: 'POST',
                headers: { 'Content-Type': 'application/json' },
                body: JSON.stringify(body || {}),
            });
            return response.json();
        }

        function syncSelection(selected) {
            document.querySelectorAll('input[id^=cb_]').forEach((cb) => {
                cb.checked = selected.includes(cb.id.slice(3));
            });
        }

        async function act(url) {
            await fetch(url);
            window.location.reload();
        }

        function stopScan(id) {
            if (confirm('Are you sure you wish to stop this scan?')) {
                act('/stopscan?id=' + encodeURIComponent(id));
            }
        }

        function deleteScan(id) {
            if (confirm('Are you sure you wish to delete this scan?')) {
                act('/scandelete?id=' + encodeURIComponent(id));
            }
        }

        async function bulk(action, question) {
            if (!confirm(question)) {
                return;
            }
            await post('/selected/' + action);
            window.location.reload();
        }

        document.addEventListener('DOMContentLoaded', () => {
            const boxes = Array.from(document.querySelectorAll('input[id^=cb_]'));
            boxes.forEach((cb, index) => {
                cb.addEventListener('click', async (e) => {
                    const reply = await post('/select', { index: index, shift: e.shiftKey });
                    syncSelection(reply.selected);
                });
            });

            const checkAll = document.getElementById('checkall');
            if (checkAll) {
                checkAll.addEventListener('click', async () => {
                    const reply = await post('/select', { all: checkAll.checked });
                    syncSelection(reply.selected);
                });
            }

            const bind = (id, handler) => {
                const el = document.getElementById(id);
                if (el) {
                    el.addEventListener('click', handler);
                }
            };
            bind('btn-refresh', () => window.location.reload());
            bind('btn-stop', () => bulk('stop', 'Are you sure you wish to stop the selected scans?'));
            bind('btn-delete', () => bulk('delete', 'Are you sure you wish to delete the selected scans?'));
            bind('btn-rerun', () => { window.location.href = '/selected/rerun'; });
        });
    </script>"#;
